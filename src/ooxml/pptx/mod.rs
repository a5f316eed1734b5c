//! PowerPoint (.pptx) presentation support.
//!
//! Just enough PresentationML to append slides to a deck:
//!
//! - `Package`: the .pptx package, its layouts and slide count
//! - `SlideLayout`: a layout with its placeholders, ready to be snapshotted
//!   into resolver regions
//! - `writer`: slide XML generation (`SlideBuilder`, `Paragraph`)
//! - `template`: the blank deck used when there is nothing to start from
//!
//! # Example
//!
//! ```rust,no_run
//! use paperslide::ooxml::pptx::{Package, Paragraph, SlideBuilder};
//!
//! let mut pkg = Package::open("deck.pptx")?;
//! let layout = pkg.slide_layouts()?.remove(1);
//! let mut slide = SlideBuilder::from_layout(&layout.placeholders);
//! slide.set_placeholder_text(0, vec![Paragraph::new("Hello")])?;
//! pkg.add_slide(&layout, &slide)?;
//! std::fs::write("deck.pptx", pkg.to_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod layout;
pub mod package;
pub mod parts;
pub mod shapes;
pub mod template;
pub mod writer;

pub use layout::SlideLayout;
pub use package::Package;
pub use shapes::{Geometry, Placeholder, PlaceholderType};
pub use writer::{Paragraph, SlideBuilder};
