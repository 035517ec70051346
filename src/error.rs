use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiftTapError {
    #[error("PDF backend not available: rebuild with `--features pdf`")]
    MissingBackend,

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShiftTapError>;
