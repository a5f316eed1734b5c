//! Types and helpers shared by the package, presentation and application layers.

pub mod error;
pub mod unit;
pub mod xml;

pub use error::{Error, Result};
