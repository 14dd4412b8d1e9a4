use crate::core::{Pipeline, SearchReport};
use crate::utils::error::Result;

/// Result of one engine run: the report plus the CSV path when one was
/// written.
#[derive(Debug)]
pub struct SearchOutcome {
    pub report: SearchReport,
    pub output_path: Option<String>,
}

/// Runs the pipeline stages in order. One search per run, no state kept
/// between runs.
pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<SearchOutcome> {
        let records = self.pipeline.extract().await?;
        tracing::info!("Fetched {} records", records.len());

        let report = self.pipeline.transform(records).await?;

        let output_path = self.pipeline.load(&report).await?;
        if let Some(path) = &output_path {
            tracing::info!("Records written to {}", path);
        }

        Ok(SearchOutcome {
            report,
            output_path,
        })
    }
}
