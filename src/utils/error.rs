use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid date format: '{value}' (expected DD/MM/YYYY)")]
    InvalidDateFormat { value: String },

    #[error("Fetch request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Export failed: {message}")]
    ExportFailure { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
