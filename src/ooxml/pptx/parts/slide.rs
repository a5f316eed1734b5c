/// Slide layout and slide master parts.
use crate::common::xml::{attr_relationship_id, attr_value};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::shapes::placeholder::{Placeholder, parse_placeholders};
use quick_xml::Reader;
use quick_xml::events::Event;

/// `name` attribute of the part's `<p:cSld>`, empty when absent.
fn common_slide_name(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"cSld" =>
            {
                return Ok(attr_value(e, b"name").unwrap_or_default());
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(String::new())
}

/// A slide layout part.
///
/// Corresponds to `/ppt/slideLayouts/slideLayoutN.xml` in the package.
pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the layout name.
    pub fn name(&self) -> Result<String> {
        common_slide_name(self.part.blob())
    }

    /// Placeholders declared by the layout, in declaration order, with only
    /// their own geometry.
    pub fn placeholders(&self) -> Result<Vec<Placeholder>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide master part.
///
/// Corresponds to `/ppt/slideMasters/slideMasterN.xml` in the package.
pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    pub fn name(&self) -> Result<String> {
        common_slide_name(self.part.blob())
    }

    /// Relationship ids of the master's layouts, in `sldLayoutIdLst` order.
    pub fn slide_layout_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == b"sldLayoutId" =>
                {
                    if let Some(rid) = attr_relationship_id(e) {
                        rids.push(rid);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rids)
    }

    pub fn placeholders(&self) -> Result<Vec<Placeholder>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::packuri::PackURI;
    use crate::ooxml::opc::part::XmlPart;

    #[test]
    fn test_master_layout_rids() {
        let xml = r#"<p:sldMaster xmlns:p="p" xmlns:r="r"><p:cSld name="Office Theme"><p:spTree/></p:cSld>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId3"/></p:sldLayoutIdLst></p:sldMaster>"#;
        let part = XmlPart::new(
            PackURI::new("/ppt/slideMasters/slideMaster1.xml").unwrap(),
            ct::PML_SLIDE_MASTER.to_string(),
            xml.as_bytes().to_vec(),
        );
        let master = SlideMasterPart::from_part(&part).unwrap();
        assert_eq!(master.name().unwrap(), "Office Theme");
        assert_eq!(master.slide_layout_rids().unwrap(), vec!["rId1", "rId3"]);
        assert!(master.placeholders().unwrap().is_empty());
    }

    #[test]
    fn test_layout_name() {
        let part = XmlPart::new(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            ct::PML_SLIDE_LAYOUT.to_string(),
            br#"<p:sldLayout xmlns:p="p"><p:cSld name="Title &amp; Content"/></p:sldLayout>"#.to_vec(),
        );
        let layout = SlideLayoutPart::from_part(&part).unwrap();
        assert_eq!(layout.name().unwrap(), "Title & Content");
        assert!(layout.placeholders().unwrap().is_empty());
    }
}
