//! Error conversion implementations.
//!
//! From implementations folding the layered package errors into [`Error`].

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            OpcError::ZipError(e) => Error::ZipError(e.to_string()),
            OpcError::XmlError(s) => Error::XmlError(s),
            OpcError::PartNotFound(s) | OpcError::RelationshipNotFound(s) => {
                Error::ComponentNotFound(s)
            },
            OpcError::PackageNotFound(s) => Error::ComponentNotFound(s),
            other => Error::Other(other.to_string()),
        }
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Opc(e) => Error::from(e),
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::PartNotFound(s) => Error::ComponentNotFound(s),
            OoxmlError::InvalidContentType { expected, got } => {
                Error::InvalidContentType { expected, got }
            },
            OoxmlError::Other(s) => Error::Other(s),
            OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
        }
    }
}
