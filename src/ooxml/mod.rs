//! Office Open XML (OOXML) format implementation.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! follows the structure of python-pptx, adapted for Rust.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **Errors** (`error`): `OoxmlError`, wrapping OPC failures
//! 3. **PresentationML** (`pptx`): layouts, placeholders and slide creation
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};
