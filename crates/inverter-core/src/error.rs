//! Driver layer errors

use thiserror::Error;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors reported by inverter drivers.
///
/// Display strings surface verbatim in the bridge's reply `error` field,
/// so every variant carries a human-readable description.
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("Connection failed: {0}")]
    ConnectFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Not supported: {0}")]
    Unsupported(String),
}
