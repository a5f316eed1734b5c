/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::part::{Part, XmlPart};
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::parts::presentation::insert_slide_id;
use crate::ooxml::pptx::parts::{PresentationPart, SlideLayoutPart, SlideMasterPart};
use crate::ooxml::pptx::shapes::placeholder::inherit_geometry;
use crate::ooxml::pptx::template;
use crate::ooxml::pptx::writer::SlideBuilder;
use std::io::{Read, Seek};
use std::path::Path;

/// Partname pattern for new slides.
const SLIDE_PARTNAME_TEMPLATE: &str = "/ppt/slides/slide%d.xml";

/// A PowerPoint (.pptx) package.
///
/// Wraps an OPC package and adds the presentation-level operations slide
/// creation needs: layout discovery, slide counting and appending a slide.
///
/// # Examples
///
/// ```rust,no_run
/// use paperslide::ooxml::pptx::Package;
///
/// let pkg = Package::open("deck.pptx")?;
/// println!("{} slides", pkg.slide_count()?);
/// for layout in pkg.slide_layouts()? {
///     println!("{}: {}", layout.index, layout.name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Create a presentation from the built-in blank template.
    pub fn new() -> Result<Self> {
        Self::from_opc(template::blank_package()?)
    }

    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .pptx package from bytes held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Verify it's a PowerPoint presentation by checking the main part's content type.
    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        // Support both regular and macro-enabled presentations
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: format!(
                    "{} or {}",
                    ct::PML_PRESENTATION_MAIN,
                    ct::PML_PRES_MACRO_MAIN
                ),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    fn presentation_part(&self) -> Result<PresentationPart<'_>> {
        let main_part = self
            .opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;
        PresentationPart::from_part(main_part)
    }

    /// Number of slides listed in `sldIdLst`.
    pub fn slide_count(&self) -> Result<usize> {
        self.presentation_part()?.slide_count()
    }

    /// Layouts of the first slide master, in `sldLayoutIdLst` order.
    ///
    /// A presentation without a master yields no layouts.
    pub fn slide_layouts(&self) -> Result<Vec<SlideLayout>> {
        let pres = self.presentation_part()?;
        let Some(master_rid) = pres.slide_master_rids()?.into_iter().next() else {
            return Ok(Vec::new());
        };

        let master_partname = self
            .opc
            .main_document_part()?
            .related_partname(&master_rid)?;
        let master = SlideMasterPart::from_part(self.opc.get_part(&master_partname)?)?;
        let master_placeholders = master.placeholders()?;

        let mut layouts = Vec::new();
        for (index, rid) in master.slide_layout_rids()?.iter().enumerate() {
            let partname = master.part().related_partname(rid)?;
            let layout = SlideLayoutPart::from_part(self.opc.get_part(&partname)?)?;

            let mut placeholders = layout.placeholders()?;
            inherit_geometry(&mut placeholders, &master_placeholders);

            layouts.push(SlideLayout {
                index,
                name: layout.name()?,
                partname,
                placeholders,
            });
        }

        tracing::debug!(
            master = %master_partname,
            layouts = layouts.len(),
            "discovered slide layouts"
        );
        Ok(layouts)
    }

    /// Append a slide rendered by `builder`, based on `layout`.
    ///
    /// Returns the partname of the new slide.
    pub fn add_slide(&mut self, layout: &SlideLayout, builder: &SlideBuilder) -> Result<PackURI> {
        let partname = self.opc.next_partname(SLIDE_PARTNAME_TEMPLATE)?;

        let mut slide = XmlPart::new(
            partname.clone(),
            ct::PML_SLIDE.to_string(),
            builder.to_xml()?.into_bytes(),
        );
        slide.relate_to(&layout.partname, rt::SLIDE_LAYOUT);
        self.opc.add_part(Box::new(slide));

        let slide_id = self.presentation_part()?.next_slide_id()?;
        let pres_partname = self.opc.main_document_partname()?;
        let pres = self.opc.get_part_mut(&pres_partname)?;
        let r_id = pres.relate_to(&partname, rt::SLIDE);
        let xml = insert_slide_id(pres.blob(), slide_id, &r_id)?;
        pres.set_blob(xml);

        tracing::debug!(
            slide = %partname,
            layout = %layout.name,
            id = slide_id,
            r_id = %r_id,
            "added slide"
        );
        Ok(partname)
    }

    /// Serialize the presentation to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }

    /// Get the underlying OPC package.
    ///
    /// This provides access to lower-level package operations.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::PlaceholderType;
    use crate::ooxml::pptx::writer::Paragraph;
    use crate::resolver::SemanticKind;

    #[test]
    fn test_blank_presentation_layouts() {
        let pkg = Package::new().unwrap();
        assert_eq!(pkg.slide_count().unwrap(), 0);

        let layouts = pkg.slide_layouts().unwrap();
        let names: Vec<&str> = layouts.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Title Slide",
                "Title and Content",
                "Section Header",
                "Two Content",
                "Title Only",
                "Blank"
            ]
        );

        let content = &layouts[1];
        assert_eq!(content.index, 1);
        assert_eq!(content.placeholders.len(), 5);
        assert!(content.placeholders.iter().all(|p| p.geometry.is_some()));

        let regions = content.regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, SemanticKind::Title);
        assert_eq!(regions[1].kind, SemanticKind::Object);
        assert!(regions[0].top < regions[1].top);
        assert!(regions[1].area() > 0);
    }

    #[test]
    fn test_add_slide_round_trip() {
        let mut pkg = Package::new().unwrap();
        let layout = pkg.slide_layouts().unwrap().remove(1);

        let mut builder = SlideBuilder::from_layout(&layout.placeholders);
        builder
            .set_placeholder_text(0, vec![Paragraph::new("First")])
            .unwrap();
        let first = pkg.add_slide(&layout, &builder).unwrap();
        let second = pkg.add_slide(&layout, &builder).unwrap();
        assert_eq!(first.as_str(), "/ppt/slides/slide1.xml");
        assert_eq!(second.as_str(), "/ppt/slides/slide2.xml");
        assert_eq!(pkg.slide_count().unwrap(), 2);

        let reopened = Package::from_bytes(pkg.to_bytes().unwrap()).unwrap();
        assert_eq!(reopened.slide_count().unwrap(), 2);

        let opc = reopened.opc_package();
        let slide = opc.get_part(&first).unwrap();
        assert_eq!(slide.content_type(), ct::PML_SLIDE);
        assert_eq!(
            slide.related_partname("rId1").unwrap(),
            layout.partname
        );
        let xml = std::str::from_utf8(slide.blob()).unwrap();
        assert!(xml.contains("<a:t>First</a:t>"));

        let pres = std::str::from_utf8(opc.main_document_part().unwrap().blob()).unwrap();
        assert!(pres.contains(r#"<p:sldId id="256" r:id="rId6"/><p:sldId id="257" r:id="rId7"/>"#));
    }

    #[test]
    fn test_layout_placeholder_kinds() {
        let pkg = Package::new().unwrap();
        let layouts = pkg.slide_layouts().unwrap();
        assert_eq!(layouts[0].placeholders[0].kind, PlaceholderType::CenterTitle);
        assert!(layouts[5].regions().is_empty());
    }

    #[test]
    fn test_rejects_non_presentation() {
        let mut opc = OpcPackage::new();
        let partname = PackURI::new("/word/document.xml").unwrap();
        opc.relate_to(&partname, rt::OFFICE_DOCUMENT);
        opc.add_part(Box::new(XmlPart::new(
            partname,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
                .to_string(),
            b"<w:document/>".to_vec(),
        )));

        let err = Package::from_bytes(opc.to_bytes().unwrap()).unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidContentType { .. }));
    }
}
