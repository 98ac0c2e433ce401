//! Error types for the vec4len CLI

use thiserror::Error;

/// Errors that can occur while driving a benchmark run
#[derive(Error, Debug)]
pub enum CliError {
    /// Library error (unsupported backend, bad workload, divergence)
    #[error(transparent)]
    Core(#[from] vec4len::Vec4Error),

    /// Writing the report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vec4len::{Backend, Vec4Error};

    #[test]
    fn test_core_error_is_transparent() {
        let err: CliError = Vec4Error::UnsupportedBackend(Backend::NEON).into();
        assert_eq!(err.to_string(), "Backend not supported on this platform: neon");
    }

    #[test]
    fn test_io_error_display() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(err.to_string().contains("closed"));
    }
}
