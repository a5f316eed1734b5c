//! Paperslide - append a paper summary slide to a PowerPoint deck
//!
//! The crate opens an existing .pptx (or a theme, or a built-in blank
//! presentation), adds one slide holding a title and a short structured body,
//! and saves the result atomically.
//!
//! # Features
//!
//! - **Placeholder resolution**: finds the title and body regions of any
//!   layout, trusting declared placeholder types first and falling back to
//!   geometry when a theme mislabels or omits them
//! - **Lossless packages**: every part of the input deck is carried through
//!   to the saved file
//! - **Atomic save**: the destination is replaced by rename, never rewritten
//!   in place
//!
//! # Example - Appending to a deck
//!
//! ```no_run
//! use paperslide::app::append_slide;
//! use paperslide::compose::SlideContent;
//! use paperslide::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("reading-group.pptx")?;
//! let content = SlideContent {
//!     title: "Attention Is All You Need".to_string(),
//!     link: "https://arxiv.org/abs/1706.03762".to_string(),
//!     ..SlideContent::default()
//! };
//! let outcome = append_slide(&mut pkg, &content, 1)?;
//! println!("added {}", outcome.slide);
//! std::fs::write("reading-group.pptx", pkg.to_bytes()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Resolving placeholders directly
//!
//! ```
//! use paperslide::resolver::{resolve, Region, SemanticKind};
//!
//! let regions = [
//!     Region { kind: SemanticKind::Unclassified, top: 100, width: 10, height: 10, supports_text: true },
//!     Region { kind: SemanticKind::Unclassified, top: 0, width: 10, height: 2, supports_text: true },
//! ];
//! let resolution = resolve(&regions);
//! assert_eq!(resolution.title, Some(1));
//! assert_eq!(resolution.body, Some(0));
//! ```

pub mod app;
pub mod cli;
pub mod common;
pub mod compose;
pub mod fsutil;
pub mod naming;
pub mod ooxml;
pub mod resolver;

pub use common::{Error, Result};
