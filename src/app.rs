//! Appending a paper slide and saving the result.
//!
//! [`append_slide`] is the in-memory step: pick a layout, resolve its title
//! and body placeholders, fill them (or inject text boxes where the layout
//! has none) and add the trailing "Next Action" box. [`run`] wraps it with
//! base-document selection, atomic save and post-save verification.

use crate::common::error::Result;
use crate::common::unit::inches;
use crate::compose::{SlideContent, next_action_paragraphs};
use crate::fsutil::save_atomic;
use crate::naming::output_path;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::{Geometry, Package, SlideBuilder};
use crate::resolver::resolve;
use chrono::{DateTime, Local};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `time.ctime`-style timestamp, e.g. `Sun Oct 18 09:05:00 2026`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

fn rect(x: f64, y: f64, cx: f64, cy: f64) -> Geometry {
    Geometry {
        x: inches(x),
        y: inches(y),
        cx: inches(cx),
        cy: inches(cy),
    }
}

/// Where the title goes when the layout has no text-capable title region.
pub fn fallback_title_box() -> Geometry {
    rect(0.6, 0.3, 9.0, 0.9)
}

/// Where the body goes when the layout has no usable body region.
pub fn fallback_body_box() -> Geometry {
    rect(0.6, 1.4, 6.7, 5.0)
}

pub fn next_action_box() -> Geometry {
    rect(0.6, 6.2, 9.0, 1.0)
}

/// What [`append_slide`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub slide: PackURI,
    /// Layout actually used, after any fallback
    pub layout_index: usize,
    pub layout_name: String,
    /// Title went into a layout placeholder rather than an injected box
    pub title_in_placeholder: bool,
    pub body_in_placeholder: bool,
}

/// Append one slide built from `content` using layout `layout_index`.
///
/// An index that does not name a layout falls back to layout 0 with a
/// warning. A presentation without layouts is an error.
pub fn append_slide(
    pkg: &mut Package,
    content: &SlideContent,
    layout_index: i64,
) -> Result<AppendOutcome> {
    let mut layouts = pkg.slide_layouts()?;
    if layouts.is_empty() {
        return Err(OoxmlError::InvalidFormat("presentation has no slide layouts".to_string()).into());
    }

    let index = match usize::try_from(layout_index) {
        Ok(i) if i < layouts.len() => i,
        _ => {
            tracing::warn!(
                "Layout index {} is invalid; falling back to 0",
                layout_index
            );
            0
        },
    };
    let layout = layouts.swap_remove(index);

    let regions = layout.regions();
    let resolution = resolve(&regions);
    let mut slide = SlideBuilder::from_layout(&layout.placeholders);

    let title_target = resolution.title;
    match title_target {
        Some(i) => slide.set_placeholder_text(i, content.title_paragraphs())?,
        None => {
            slide.add_text_box(fallback_title_box(), content.title_paragraphs());
        },
    }

    let body_target = resolution.body;
    match body_target {
        Some(i) => slide.set_placeholder_text(i, content.body_paragraphs())?,
        None => {
            slide.add_text_box(fallback_body_box(), content.body_paragraphs());
        },
    }

    slide.add_text_box(next_action_box(), next_action_paragraphs());

    let partname = pkg.add_slide(&layout, &slide)?;
    Ok(AppendOutcome {
        slide: partname,
        layout_index: index,
        layout_name: layout.name,
        title_in_placeholder: title_target.is_some(),
        body_in_placeholder: body_target.is_some(),
    })
}

/// One invocation of the tool.
#[derive(Debug, Clone)]
pub struct AppendRequest {
    pub content: SlideContent,
    pub outdir: PathBuf,
    /// Deck to append to; the result is always saved here when set
    pub deck: Option<PathBuf>,
    /// Presentation to start from when there is no existing deck
    pub theme: Option<PathBuf>,
    pub layout: i64,
}

/// Post-save check of a deck written in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCheck {
    /// Slide count after reopening the saved file, -1 if it could not be read
    pub reopened: i64,
    pub modified: Option<DateTime<Local>>,
}

/// Summary printed after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub path: PathBuf,
    pub before: usize,
    pub after: usize,
    /// Present in deck mode only
    pub deck: Option<DeckCheck>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.deck {
            Some(check) => {
                writeln!(f, "Deck: {}", self.path.display())?;
                writeln!(
                    f,
                    "Slides: {} -> {} (reopen: {})",
                    self.before, self.after, check.reopened
                )?;
                if let Some(modified) = check.modified {
                    writeln!(f, "Modified: {}", modified.format(CTIME_FORMAT))?;
                }
            },
            None => writeln!(f, "Slides: {} -> {}", self.before, self.after)?,
        }
        writeln!(f, "{}", self.path.display())
    }
}

/// Existing deck, then theme, then the blank template.
fn load_base(request: &AppendRequest) -> Result<Package> {
    if let Some(deck) = request.deck.as_deref().filter(|p| p.exists()) {
        tracing::debug!(deck = %deck.display(), "appending to existing deck");
        return Ok(Package::open(deck)?);
    }
    if let Some(theme) = request.theme.as_deref().filter(|p| p.exists()) {
        tracing::debug!(theme = %theme.display(), "starting from theme");
        return Ok(Package::open(theme)?);
    }
    tracing::debug!("starting from blank presentation");
    Ok(Package::new()?)
}

fn save(pkg: &Package, dest: &Path) -> Result<()> {
    let bytes = pkg.to_bytes()?;
    save_atomic(dest, |file| {
        file.write_all(&bytes)?;
        Ok(())
    })
}

fn verify_deck(path: &Path) -> DeckCheck {
    let reopened = match Package::open(path).and_then(|pkg| pkg.slide_count()) {
        Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "saved deck could not be reopened");
            -1
        },
    };
    let modified = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Local>::from);

    DeckCheck { reopened, modified }
}

/// Load, append, save and verify.
pub fn run(request: &AppendRequest) -> Result<RunReport> {
    let mut pkg = load_base(request)?;

    let before = pkg.slide_count()?;
    let outcome = append_slide(&mut pkg, &request.content, request.layout)?;
    let after = pkg.slide_count()?;
    tracing::debug!(
        slide = %outcome.slide,
        layout = %outcome.layout_name,
        title_in_placeholder = outcome.title_in_placeholder,
        body_in_placeholder = outcome.body_in_placeholder,
        "appended slide"
    );

    match &request.deck {
        Some(deck) => {
            save(&pkg, deck)?;
            Ok(RunReport {
                path: deck.clone(),
                before,
                after,
                deck: Some(verify_deck(deck)),
            })
        },
        None => {
            let path = output_path(&request.outdir, &request.content.title);
            save(&pkg, &path)?;
            Ok(RunReport {
                path,
                before,
                after,
                deck: None,
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::part::Part;

    fn content() -> SlideContent {
        SlideContent {
            title: "Attention Is All You Need".to_string(),
            link: "https://arxiv.org/abs/1706.03762".to_string(),
            reason: "baseline".to_string(),
            usage: String::new(),
            ..SlideContent::default()
        }
    }

    fn slide_xml(pkg: &Package, partname: &PackURI) -> String {
        let part = pkg.opc_package().get_part(partname).unwrap();
        String::from_utf8(part.blob().to_vec()).unwrap()
    }

    #[test]
    fn test_title_and_content_layout_uses_placeholders() {
        let mut pkg = Package::new().unwrap();
        let outcome = append_slide(&mut pkg, &content(), 1).unwrap();

        assert_eq!(outcome.layout_index, 1);
        assert_eq!(outcome.layout_name, "Title and Content");
        assert!(outcome.title_in_placeholder);
        assert!(outcome.body_in_placeholder);
        assert_eq!(pkg.slide_count().unwrap(), 1);

        let xml = slide_xml(&pkg, &outcome.slide);
        assert!(xml.contains(r#"sz="3200" dirty="0"/><a:t>Attention Is All You Need</a:t>"#));
        assert!(xml.contains("<a:t>Link: https://arxiv.org/abs/1706.03762</a:t>"));
        assert!(xml.contains(r#"<a:pPr lvl="1"/><a:r><a:rPr lang="en-US" sz="1400" dirty="0"/><a:t>Relevance: baseline</a:t>"#));
        assert!(!xml.contains("Application:"));
        assert!(xml.contains("<a:t>Next Action:</a:t>"));
        // only the Next Action box is injected
        assert_eq!(xml.matches(r#"txBox="1""#).count(), 1);
    }

    #[test]
    fn test_blank_layout_injects_boxes() {
        let mut pkg = Package::new().unwrap();
        let outcome = append_slide(&mut pkg, &content(), 5).unwrap();

        assert!(!outcome.title_in_placeholder);
        assert!(!outcome.body_in_placeholder);
        let xml = slide_xml(&pkg, &outcome.slide);
        assert_eq!(xml.matches(r#"txBox="1""#).count(), 3);
        assert!(xml.contains(r#"<a:off x="548640" y="274320"/><a:ext cx="8229600" cy="822960"/>"#));
        assert!(xml.contains(r#"<a:off x="548640" y="1280160"/><a:ext cx="6126480" cy="4572000"/>"#));
        assert!(xml.contains(r#"<a:off x="548640" y="5669280"/><a:ext cx="8229600" cy="914400"/>"#));
    }

    #[test]
    fn test_title_slide_layout_puts_body_in_box() {
        // ctrTitle takes the title; the subtitle is never used for the body
        let mut pkg = Package::new().unwrap();
        let outcome = append_slide(&mut pkg, &content(), 0).unwrap();
        assert!(outcome.title_in_placeholder);
        assert!(!outcome.body_in_placeholder);
    }

    #[test]
    fn test_invalid_layout_falls_back_to_first() {
        for index in [-1, 6, 1_000] {
            let mut pkg = Package::new().unwrap();
            let outcome = append_slide(&mut pkg, &content(), index).unwrap();
            assert_eq!(outcome.layout_index, 0);
            assert_eq!(outcome.layout_name, "Title Slide");
        }
    }

    #[test]
    fn test_empty_title_is_pending() {
        let mut pkg = Package::new().unwrap();
        let mut c = content();
        c.title.clear();
        let outcome = append_slide(&mut pkg, &c, 1).unwrap();
        assert!(slide_xml(&pkg, &outcome.slide).contains("<a:t>(title pending)</a:t>"));
    }

    #[test]
    fn test_report_formatting() {
        let report = RunReport {
            path: PathBuf::from("/tmp/out.pptx"),
            before: 0,
            after: 1,
            deck: None,
        };
        assert_eq!(report.to_string(), "Slides: 0 -> 1\n/tmp/out.pptx\n");

        let report = RunReport {
            deck: Some(DeckCheck {
                reopened: -1,
                modified: None,
            }),
            before: 3,
            after: 4,
            ..report
        };
        assert_eq!(
            report.to_string(),
            "Deck: /tmp/out.pptx\nSlides: 3 -> 4 (reopen: -1)\n/tmp/out.pptx\n"
        );
    }
}
