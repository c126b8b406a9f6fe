use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyEvoError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus directory not found: {}", path.display())]
    CorpusNotFound { path: PathBuf },

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout Configuration Error: {0}")]
    ConfigParse(String),

    #[error("Invalid Parameter: {0}")]
    InvalidParameter(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type KeResult<T> = Result<T, KeyEvoError>;
