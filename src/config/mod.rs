pub mod cli;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://open.canada.ca/data/api/3/action/datastore_search";

/// Proactive Disclosure of Contracts dataset.
pub const DEFAULT_RESOURCE_ID: &str = "fac950c0-00d5-4ec1-a4d3-9cbebf98a305";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "contract-bench")]
#[command(about = "Fetch and summarize contract disclosures from a CKAN datastore")]
pub struct CliConfig {
    /// Keyword to search for, e.g. "interpretation"
    pub keyword: String,

    #[arg(long, default_value_t = 500, help = "Maximum number of records to fetch")]
    pub max_records: usize,

    #[arg(long, help = "Optional CSV output file")]
    pub output: Option<String>,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_RESOURCE_ID)]
    pub resource_id: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage after the run")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn max_records(&self) -> usize {
        self.max_records
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("resource_id", &self.resource_id)?;
        validate_non_empty_string("keyword", &self.keyword)?;
        validate_positive_number("max_records", self.max_records, 1)?;
        Ok(())
    }
}
