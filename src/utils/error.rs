use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl BenchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            BenchError::ApiError(e) => {
                if e.is_timeout() {
                    "The datastore did not answer within 30 seconds".to_string()
                } else if e.is_status() {
                    format!(
                        "The datastore rejected the request (HTTP {})",
                        e.status().map(|s| s.to_string()).unwrap_or_default()
                    )
                } else {
                    "Could not reach the datastore".to_string()
                }
            }
            BenchError::CsvError(_) => "Could not render the records as CSV".to_string(),
            BenchError::IoError(_) => "Could not write the output file".to_string(),
            BenchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            BenchError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BenchError::ApiError(_) => {
                "Check the network connection and the --api-endpoint value, then run the search again"
                    .to_string()
            }
            BenchError::IoError(_) => {
                "Check that the --output path is writable".to_string()
            }
            BenchError::InvalidConfigValueError { field, .. } => {
                format!("Adjust the {} argument and retry", field)
            }
            _ => "Re-run with --verbose for details".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
