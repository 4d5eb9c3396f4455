//! Error types for the tokzip library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the compressor library.
///
/// The compression and decompression paths themselves are infallible: a
/// seeded dictionary always covers every input byte, a full dictionary is a
/// normal termination condition, and a refused bucket insertion is recovered
/// locally during training. Errors only arise at the artifact io boundary.
#[derive(Error, Debug)]
pub enum CompressorError {
    /// Error loading a compressed artifact
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a compressed artifact
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for compressor operations.
pub type Result<T> = std::result::Result<T, CompressorError>;
