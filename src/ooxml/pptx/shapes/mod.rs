/// Shapes module for PowerPoint presentations.
///
/// Only placeholders are modelled: they are what a new slide inherits from
/// its layout and where its title and body text go.
pub mod placeholder;

pub use placeholder::{Geometry, Placeholder, PlaceholderType, ShapeElement};
