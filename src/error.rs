//! Error types for ratewatch

use thiserror::Error;

/// Main error type for ratewatch operations.
///
/// Absence of a rate is not an error: the core reports it as `None` and
/// keeps going. These variants cover the transport boundary, configuration,
/// and the retry store's file IO.
#[derive(Error, Debug)]
pub enum RatewatchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for ratewatch operations
pub type Result<T> = std::result::Result<T, RatewatchError>;
