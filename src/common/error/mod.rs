//! Unified error types for paperslide.

pub mod conversions;
pub mod types;

pub use types::{Error, Result};
