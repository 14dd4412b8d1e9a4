pub mod client;
pub mod engine;
pub mod pipeline;
pub mod summary;

pub use crate::domain::model::{Record, SearchReport, Summary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
