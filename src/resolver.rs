//! Title/body placeholder resolution.
//!
//! Given the regions a slide layout declares, pick one region for the title
//! and a different one for the body. Declared semantic kinds are trusted
//! first; when a layout omits or misuses them, geometry decides: the topmost
//! text region is the title, the largest remaining one is the body.
//!
//! Resolution is a pure function over a snapshot. A missing title or body is
//! a normal outcome; the caller decides what to put there instead.

use std::cmp::Reverse;

/// Declared role of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    Title,
    CenterTitle,
    VerticalTitle,
    Body,
    Object,
    VerticalBody,
    Subtitle,
    Date,
    SlideNumber,
    Footer,
    Header,
    /// No role the resolver cares about (pictures, charts, tables, ...).
    Unclassified,
}

impl SemanticKind {
    #[inline]
    pub fn is_title(self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle | Self::VerticalTitle)
    }

    #[inline]
    pub fn is_body(self) -> bool {
        matches!(self, Self::Body | Self::Object | Self::VerticalBody)
    }

    /// Kinds that never receive body text, even geometrically.
    #[inline]
    pub fn excluded_from_body(self) -> bool {
        self.is_title()
            || matches!(
                self,
                Self::Subtitle | Self::Date | Self::SlideNumber | Self::Footer | Self::Header
            )
    }
}

/// A rectangle on a slide, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: SemanticKind,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    pub supports_text: bool,
}

impl Region {
    #[inline]
    pub fn area(&self) -> i128 {
        i128::from(self.width) * i128::from(self.height)
    }
}

/// Indices into the resolved region slice.
///
/// `title` and `body` are never the same index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub title: Option<usize>,
    pub body: Option<usize>,
}

/// Pick the title and body regions.
pub fn resolve(regions: &[Region]) -> Resolution {
    let title = resolve_title(regions);
    let body = resolve_body(regions, title);

    tracing::debug!(
        regions = regions.len(),
        title = ?title,
        body = ?body,
        "resolved placeholders"
    );

    Resolution { title, body }
}

fn resolve_title(regions: &[Region]) -> Option<usize> {
    regions
        .iter()
        .position(|r| r.kind.is_title())
        .or_else(|| {
            // min_by_key keeps the first of equal keys
            regions
                .iter()
                .enumerate()
                .filter(|(_, r)| r.supports_text)
                .min_by_key(|(_, r)| (r.top, Reverse(r.area())))
                .map(|(i, _)| i)
        })
}

fn resolve_body(regions: &[Region], title: Option<usize>) -> Option<usize> {
    let not_title = |i: &usize| Some(*i) != title;

    let semantic = regions
        .iter()
        .enumerate()
        .filter(|(i, _)| not_title(i))
        .find(|(_, r)| r.kind.is_body())
        .map(|(i, _)| i);
    if semantic.is_some() {
        return semantic;
    }

    // Strictly-greater comparison so equal areas keep the earliest region.
    regions
        .iter()
        .enumerate()
        .filter(|(i, r)| not_title(i) && r.supports_text && !r.kind.excluded_from_body())
        .fold(None, |best: Option<(usize, i128)>, (i, r)| match best {
            Some((_, area)) if area >= r.area() => best,
            _ => Some((i, r.area())),
        })
        .map(|(i, _)| i)
}
