/// Slide XML builder.
///
/// A new slide starts as a copy of its layout's cloneable placeholders, in
/// layout order, so placeholder `i` of the builder is region `i` of the
/// layout snapshot handed to the resolver.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::shapes::placeholder::{Geometry, Placeholder};
use crate::ooxml::pptx::writer::text::{Paragraph, write_text_body};
use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone)]
enum SlideShape {
    Placeholder {
        id: u32,
        name: String,
        ph_element: String,
        paragraphs: Vec<Paragraph>,
    },
    TextBox {
        id: u32,
        name: String,
        geometry: Geometry,
        paragraphs: Vec<Paragraph>,
    },
}

/// Shapes of a slide under construction.
#[derive(Debug, Clone, Default)]
pub struct SlideBuilder {
    shapes: Vec<SlideShape>,
    placeholder_count: usize,
}

impl SlideBuilder {
    /// Start a slide from the layout's placeholders; date, footer and slide
    /// number placeholders are skipped.
    pub fn from_layout(placeholders: &[Placeholder]) -> Self {
        let shapes: Vec<SlideShape> = placeholders
            .iter()
            .filter(|p| p.is_cloneable())
            .map(|p| SlideShape::Placeholder {
                id: p.id,
                name: p.name.clone(),
                ph_element: p.ph_element(),
                paragraphs: Vec::new(),
            })
            .collect();

        Self {
            placeholder_count: shapes.len(),
            shapes,
        }
    }

    /// Number of placeholders copied from the layout.
    #[inline]
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    /// Replace the text of placeholder `index`.
    pub fn set_placeholder_text(&mut self, index: usize, text: Vec<Paragraph>) -> Result<()> {
        match self.shapes.get_mut(index) {
            Some(SlideShape::Placeholder { paragraphs, .. }) => {
                *paragraphs = text;
                Ok(())
            },
            _ => Err(OoxmlError::Other(format!(
                "no placeholder at index {}",
                index
            ))),
        }
    }

    fn next_shape_id(&self) -> u32 {
        // id 1 is the group shape of spTree itself
        self.shapes
            .iter()
            .map(|shape| match shape {
                SlideShape::Placeholder { id, .. } | SlideShape::TextBox { id, .. } => *id,
            })
            .max()
            .unwrap_or(1)
            .max(1)
            + 1
    }

    /// Append a free-standing text box and return its shape id.
    pub fn add_text_box(&mut self, geometry: Geometry, paragraphs: Vec<Paragraph>) -> u32 {
        let id = self.next_shape_id();
        self.shapes.push(SlideShape::TextBox {
            id,
            name: format!("TextBox {}", id - 1),
            geometry,
            paragraphs,
        });
        id
    }

    /// Render the complete `<p:sld>` document.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        for shape in &self.shapes {
            write_shape(&mut xml, shape)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

fn write_shape(xml: &mut String, shape: &SlideShape) -> Result<()> {
    match shape {
        SlideShape::Placeholder {
            id,
            name,
            ph_element,
            paragraphs,
        } => {
            xml.push_str("<p:sp>");
            xml.push_str("<p:nvSpPr>");
            write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, id, escape_xml(name))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
            xml.push_str("<p:nvPr>");
            xml.push_str(ph_element);
            xml.push_str("</p:nvPr>");
            xml.push_str("</p:nvSpPr>");
            xml.push_str("<p:spPr/>");
            write_text_body(xml, "<a:bodyPr/>", paragraphs)?;
            xml.push_str("</p:sp>");
        },
        SlideShape::TextBox {
            id,
            name,
            geometry,
            paragraphs,
        } => {
            xml.push_str("<p:sp>");
            xml.push_str("<p:nvSpPr>");
            write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, id, escape_xml(name))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
            xml.push_str("<p:nvPr/>");
            xml.push_str("</p:nvSpPr>");

            xml.push_str("<p:spPr>");
            xml.push_str("<a:xfrm>");
            write!(xml, r#"<a:off x="{}" y="{}"/>"#, geometry.x, geometry.y)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, geometry.cx, geometry.cy)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str("</a:xfrm>");
            xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
            xml.push_str("<a:noFill/>");
            xml.push_str("</p:spPr>");

            write_text_body(
                xml,
                r#"<a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#,
                paragraphs,
            )?;
            xml.push_str("</p:sp>");
        },
    }
    Ok(())
}
