
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TinkerError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown tweak: {0}")]
    NotFound(String),
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    #[error("Color parse error: {0}")]
    ColorParse(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, TinkerError>;

// Helper conversions
impl From<rusqlite::Error> for TinkerError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
impl From<serde_json::Error> for TinkerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
