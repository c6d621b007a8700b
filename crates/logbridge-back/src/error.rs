//! Back-end error types.

use thiserror::Error;

/// Errors raised by the logging engine.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Writing or syncing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for back-end operations.
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::Config("bad level".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad level");

        let err = BackendError::from(std::io::Error::other("pipe closed"));
        assert_eq!(err.to_string(), "IO error: pipe closed");
    }
}
