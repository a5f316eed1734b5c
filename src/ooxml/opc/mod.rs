//! Open Packaging Conventions (OPC) layer.
//!
//! Reads a ZIP-based package into memory, exposes its parts and
//! relationships, and writes it back out. Every member with a content type is
//! carried through unchanged unless a caller replaces its blob.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
