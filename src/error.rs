use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed table file: {0}")]
    Malformed(String),

    #[error("No record with id {0}")]
    RecordNotFound(Uuid),

    #[error("Cleaning has not been run yet")]
    CleaningRequired,

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
