//! Unified error type for paperslide.
//!
//! Package-level (`OpcError`) and format-level (`OoxmlError`) failures are folded
//! into this type at the crate boundary, alongside the filesystem failures of the
//! save path.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for paperslide operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Part or relationship missing from the package
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Writing the destination file failed; the temporary file has been removed
    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for paperslide operations.
pub type Result<T> = std::result::Result<T, Error>;
