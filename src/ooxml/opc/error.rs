/// Error types for OPC package operations
use thiserror::Error;

/// Failures while reading, navigating or writing a ZIP-based package.
#[derive(Error, Debug)]
pub enum OpcError {
    /// The package file does not exist
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// A partname or relationship target that is not a valid pack URI
    #[error("invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("part not found: {0}")]
    PartNotFound(String),

    /// No relationship with the requested rId or type
    #[error("relationship not found: {0}")]
    RelationshipNotFound(String),

    /// A relationship that cannot be followed, e.g. an external one
    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Malformed `[Content_Types].xml`, `.rels` or XML part
    #[error("XML parsing error: {0}")]
    XmlError(String),

    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpcError>;
