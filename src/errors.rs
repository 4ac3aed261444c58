// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset must be a JSON array of events")]
    NotAnArray,

    #[error("Invalid {field} '{value}' on event {id}")]
    InvalidDate { id: i64, field: &'static str, value: String },

    #[error("Duplicate event id: {0}")]
    DuplicateId(i64),

    #[error("Invalid dataset source: {0}")]
    InvalidSource(String),
}
