//! Slide writer components for PPTX.

pub mod slide;
pub mod text;

pub use slide::SlideBuilder;
pub use text::Paragraph;
