use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizbookError>;

#[derive(Debug, Error)]
pub enum QuizbookError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid card ID: {0:?}")]
    InvalidCardId(String),

    #[error("Card {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Quizbook not initialized. Run 'quizbook init' first.")]
    NotInitialized,

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "sqlite-storage")]
impl From<rusqlite::Error> for QuizbookError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}
