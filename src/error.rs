//! Error types for qqwry-rs
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for qqwry-rs
#[derive(Error, Debug)]
pub enum QQwryError {
    /// Database file not found
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Malformed dotted-quad input, rejected before the index is touched
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// Header offsets do not describe an index inside the file
    #[error("Invalid database header: {0}")]
    InvalidHeader(String),

    /// Offset arithmetic left the mapped region or redirects nested too deep
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for qqwry-rs
pub type Result<T> = std::result::Result<T, QQwryError>;

impl QQwryError {
    /// Create a corrupt record error
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        QQwryError::CorruptRecord(msg.into())
    }

    /// Create a header error
    pub fn header<S: Into<String>>(msg: S) -> Self {
        QQwryError::InvalidHeader(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        QQwryError::ConfigError(msg.into())
    }

    /// Read of `len` bytes at `offset` fell outside a buffer of `size` bytes
    pub fn out_of_bounds(offset: usize, len: usize, size: usize) -> Self {
        QQwryError::CorruptRecord(format!(
            "read out of bounds: offset={}, len={}, size={}",
            offset, len, size
        ))
    }
}

/// Convert from TryFromSliceError
impl From<std::array::TryFromSliceError> for QQwryError {
    fn from(err: std::array::TryFromSliceError) -> Self {
        QQwryError::CorruptRecord(format!("Failed to convert byte slice: {}", err))
    }
}
