//! Error taxonomy for code generation and artifact fetching.
//!
//! Input and generation errors are fatal to a run; `FetchError` is always
//! scoped to a single code and ends up in that code's `FetchOutcome`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::transport::TransportError;

/// Malformed configuration or code text. Raised before a batch starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputValidationError {
    #[error("fixed part must be exactly 6 digits, got {0:?}")]
    FixedPart(String),
    #[error("start serial must be in 0..=999, got {0}")]
    StartSerial(u32),
    #[error("quantity must be at least 1")]
    Quantity,
    #[error("timeout must be at least 1 second")]
    Timeout,
    #[error("expected a non-empty string of ASCII digits, got {0:?}")]
    NotDigits(String),
    #[error("code must be exactly 14 digits, got {0:?}")]
    CodeLength(String),
    #[error("check digit mismatch for {code}: expected {expected}, found {found}")]
    CheckDigitMismatch { code: String, expected: u8, found: u8 },
}

/// Generation-time failure. Aborts the remaining generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("serial {serial} no longer fits in 3 digits")]
    RangeExceeded { serial: u32 },
}

/// Why fetching a single code's artifact failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout, or non-2xx response. Retried within the attempt budget.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    /// The body arrived but is not a PNG (often an HTML error page). Not retried.
    #[error("downloaded {len} bytes but they are not a PNG (possibly an HTML page)")]
    ContentValidation { len: usize },
    /// Writing the temp file or renaming it into place failed. Not retried.
    #[error("filesystem: {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn filesystem(path: &std::path::Path, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
