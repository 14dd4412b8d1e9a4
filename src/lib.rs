pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{client::CkanClient, engine::SearchEngine, pipeline::SearchPipeline};
pub use crate::domain::model::{Record, Summary};
pub use crate::utils::error::{BenchError, Result};
