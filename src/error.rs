use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetarError>;

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { status: reqwest::StatusCode, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Render error: {0}")]
    Render(String),
}
