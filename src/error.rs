use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Invalid CSV data")]
    InvalidInput,

    #[error("Company column '{0}' not found in input")]
    MissingCompanyColumn(String),

    #[error("Processing failed: {0}")]
    Stage(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
