//! Error handling for codestract
//!
//! A single error type covers every failure the exporter can hit, from
//! per-file decode problems to fatal output-stream errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for codestract operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// File system error tied to a specific path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bytes could not be decoded under the detected encoding
    #[error("cannot decode {path} as {encoding}")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Encoding label not known to the decoder
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Specialized Result type for codestract operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Returns a configuration error with a formatted message
#[macro_export]
macro_rules! bail_config {
    ($($arg:tt)*) => {
        return Err($crate::error::ExportError::Config(format!($($arg)*)))
    };
}

// Allow converting ExportError to io::Error so tests can keep io::Result signatures
impl From<ExportError> for io::Error {
    fn from(err: ExportError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}
