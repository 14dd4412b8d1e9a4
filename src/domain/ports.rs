use crate::domain::model::{Record, SearchReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sink for CSV exports. The pipeline only ever writes; nothing reads back
/// through this port.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn resource_id(&self) -> &str;
    fn keyword(&self) -> &str;
    fn max_records(&self) -> usize;
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<SearchReport>;
    async fn load(&self, report: &SearchReport) -> Result<Option<String>>;
}
