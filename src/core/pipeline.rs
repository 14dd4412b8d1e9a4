use crate::core::client::CkanClient;
use crate::core::summary::summarize;
use crate::core::{ConfigProvider, Pipeline, Record, SearchReport, Storage};
use crate::utils::error::{BenchError, Result};
use std::collections::BTreeSet;

/// Fetch → summarize → export pipeline over the `Storage` and
/// `ConfigProvider` ports.
pub struct SearchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: CkanClient,
}

impl<S: Storage, C: ConfigProvider> SearchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = CkanClient::new(config.api_endpoint(), config.resource_id());
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SearchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::info!(
            "🔍 Searching contracts for '{}' (max {} records)",
            self.config.keyword(),
            self.config.max_records()
        );

        self.client
            .fetch_all(self.config.keyword(), self.config.max_records())
            .await
    }

    async fn transform(&self, data: Vec<Record>) -> Result<SearchReport> {
        let summary = summarize(&data);
        let csv_output = records_to_csv(&data)?;

        Ok(SearchReport {
            records: data,
            summary,
            csv_output,
        })
    }

    async fn load(&self, report: &SearchReport) -> Result<Option<String>> {
        let Some(path) = self.config.output_path() else {
            return Ok(None);
        };

        tracing::debug!(
            "Writing {} records as CSV to {}",
            report.records.len(),
            path
        );
        self.storage
            .write_file(path, report.csv_output.as_bytes())
            .await?;

        Ok(Some(path.to_string()))
    }
}

/// Render records as CSV. The header is the union of all field names seen,
/// in sorted order; fields a record does not carry render as empty cells.
pub fn records_to_csv(records: &[Record]) -> Result<String> {
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        for key in record.data.keys() {
            columns.insert(key);
        }
    }
    let columns: Vec<&str> = columns.into_iter().collect();

    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|col| field_text(record.data.get(*col)))
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BenchError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| BenchError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

/// Flat text form of a record field. Strings stay bare, scalars use their
/// JSON form, nested values stay compact JSON, absent fields are empty.
pub fn field_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        resource_id: String,
        keyword: String,
        max_records: usize,
        output_path: Option<String>,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                resource_id: "test-resource".to_string(),
                keyword: "interpretation".to_string(),
                max_records: 500,
                output_path: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
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
            self.output_path.as_deref()
        }
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_extract_fetches_search_results() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("resource_id", "test-resource")
                .query_param("q", "interpretation");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"result": {"records": [
                    {"_id": 1, "vendor_name": "Acme", "contract_value": 100},
                    {"_id": 2, "vendor_name": "Globex", "contract_value": 200}
                ], "total": 2}}));
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/"));
        let pipeline = SearchPipeline::new(storage, config);

        let result = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0].data.get("vendor_name").unwrap().as_str().unwrap(),
            "Acme"
        );
    }

    #[tokio::test]
    async fn test_transform_builds_summary_and_csv() {
        let input = vec![
            record(serde_json::json!({"vendor_name": "Acme", "contract_value": 100})),
            record(serde_json::json!({"vendor_name": "Globex", "contract_value": "200"})),
        ];

        let storage = MockStorage::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = SearchPipeline::new(storage, config);

        let report = pipeline.transform(input).await.unwrap();

        let summary = report.summary.as_ref().unwrap();
        assert_eq!(summary.average_value, 150.0);
        assert_eq!(summary.frequency, 2);

        let csv_lines: Vec<&str> = report.csv_output.lines().collect();
        assert_eq!(csv_lines[0], "contract_value,vendor_name");
        assert_eq!(csv_lines[1], "100,Acme");
        assert_eq!(csv_lines[2], "200,Globex");
    }

    #[tokio::test]
    async fn test_transform_empty_result_set_has_no_summary() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = SearchPipeline::new(storage, config);

        let report = pipeline.transform(Vec::new()).await.unwrap();

        assert!(report.summary.is_none());
        assert!(report.records.is_empty());
        assert!(report.csv_output.is_empty());
    }

    #[tokio::test]
    async fn test_load_writes_csv_when_output_configured() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("http://test.invalid".to_string());
        config.output_path = Some("contracts.csv".to_string());
        let pipeline = SearchPipeline::new(storage.clone(), config);

        let report = SearchReport {
            records: vec![record(serde_json::json!({"vendor_name": "Acme"}))],
            summary: None,
            csv_output: "vendor_name\nAcme\n".to_string(),
        };

        let output_path = pipeline.load(&report).await.unwrap();

        assert_eq!(output_path.as_deref(), Some("contracts.csv"));
        let written = storage.get_file("contracts.csv").await.unwrap();
        assert_eq!(written, b"vendor_name\nAcme\n");
    }

    #[tokio::test]
    async fn test_load_skipped_without_output_path() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = SearchPipeline::new(storage.clone(), config);

        let report = SearchReport {
            records: vec![],
            summary: None,
            csv_output: String::new(),
        };

        let output_path = pipeline.load(&report).await.unwrap();

        assert!(output_path.is_none());
        assert!(storage.get_file("contracts.csv").await.is_none());
    }

    #[test]
    fn test_records_to_csv_union_header_and_sparse_fields() {
        let records = vec![
            record(serde_json::json!({"vendor_name": "Acme", "contract_value": 100})),
            record(serde_json::json!({"vendor_name": "Globex", "contract_period": "2024"})),
        ];

        let csv = records_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "contract_period,contract_value,vendor_name");
        assert_eq!(lines[1], ",100,Acme");
        assert_eq!(lines[2], "2024,,Globex");
    }

    #[test]
    fn test_records_to_csv_round_trip() {
        let records = vec![
            record(serde_json::json!({"vendor_name": "Acme, Inc.", "contract_value": "1,200"})),
            record(serde_json::json!({"vendor_name": "Globex", "contract_value": "900"})),
        ];

        let csv = records_to_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(header, vec!["contract_value", "vendor_name"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1,200");
        assert_eq!(&rows[0][1], "Acme, Inc.");
        assert_eq!(&rows[1][1], "Globex");
    }

    #[test]
    fn test_records_to_csv_empty_input() {
        assert_eq!(records_to_csv(&[]).unwrap(), "");
    }
}
