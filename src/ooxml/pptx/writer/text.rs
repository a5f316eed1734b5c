//! Paragraph model and DrawingML text body serialization.

use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// One paragraph of a text frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Outline level, 0 for top level
    pub level: u8,
    /// Font size in points; `None` inherits from the layout
    pub font_size: Option<f64>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
            font_size: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }
}

/// Escape run text, writing characters XML 1.0 cannot carry as `_xHHHH_`.
fn escape_run_text(text: &str) -> String {
    let escaped = escape_xml(text);
    if !escaped.chars().any(|c| c < '\u{20}' && !matches!(c, '\t' | '\r')) {
        return escaped;
    }
    escaped
        .chars()
        .map(|c| {
            if c < '\u{20}' && !matches!(c, '\t' | '\r') {
                format!("_x{:04X}_", c as u32)
            } else {
                c.to_string()
            }
        })
        .collect()
}

fn write_run_props(xml: &mut String, tag: &str, size: Option<u32>) -> Result<()> {
    write!(xml, r#"<a:{} lang="en-US""#, tag).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    if let Some(sz) = size {
        write!(xml, r#" sz="{}""#, sz).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str(r#" dirty="0"/>"#);
    Ok(())
}

/// Append one `<a:p>` element.
///
/// Newlines (and vertical tabs) inside the text become `<a:br/>` line breaks.
pub(crate) fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    let size = paragraph.font_size.map(pt_to_centipoints);

    xml.push_str("<a:p>");
    if paragraph.level > 0 {
        write!(xml, r#"<a:pPr lvl="{}"/>"#, paragraph.level)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }

    if paragraph.text.is_empty() {
        write_run_props(xml, "endParaRPr", size)?;
    } else {
        for (i, line) in paragraph.text.split(['\n', '\u{b}']).enumerate() {
            if i > 0 {
                xml.push_str("<a:br>");
                write_run_props(xml, "rPr", size)?;
                xml.push_str("</a:br>");
            }
            if line.is_empty() {
                continue;
            }
            xml.push_str("<a:r>");
            write_run_props(xml, "rPr", size)?;
            write!(xml, "<a:t>{}</a:t>", escape_run_text(line))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str("</a:r>");
        }
    }

    xml.push_str("</a:p>");
    Ok(())
}

/// Append a `<p:txBody>` holding `paragraphs` (at least one `<a:p>`).
pub(crate) fn write_text_body(
    xml: &mut String,
    body_pr: &str,
    paragraphs: &[Paragraph],
) -> Result<()> {
    xml.push_str("<p:txBody>");
    xml.push_str(body_pr);
    xml.push_str("<a:lstStyle/>");
    if paragraphs.is_empty() {
        xml.push_str("<a:p/>");
    }
    for paragraph in paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.push_str("</p:txBody>");
    Ok(())
}
