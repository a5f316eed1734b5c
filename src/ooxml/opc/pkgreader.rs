//! Low-level, read-only API to a serialized Open Packaging Convention (OPC) package.
//!
//! Unlike a relationship-graph walk, every member of the archive that has a
//! content type is loaded as a part. Appending a slide must not silently drop
//! parts a theme author left unreferenced.

use crate::common::xml::attr_value;
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Serialized part with its content and relationships.
#[derive(Debug)]
pub struct SerializedPart {
    /// The partname (URI) of this part
    pub partname: PackURI,

    /// The content type of this part
    pub content_type: String,

    /// The binary content of this part
    pub blob: Vec<u8>,

    /// Serialized relationships from this part
    pub srels: SmallVec<[SerializedRelationship; 8]>,
}

/// Serialized relationship as read from a .rels file.
#[derive(Debug, Clone)]
pub struct SerializedRelationship {
    /// Relationship ID (e.g., "rId1")
    pub r_id: String,

    /// Relationship type URI
    pub reltype: String,

    /// Target reference (relative URI or external URL)
    pub target_ref: String,

    /// Target mode (Internal or External)
    pub target_mode: String,
}

impl SerializedRelationship {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }
}

/// Content type lookup built from `[Content_Types].xml`.
///
/// Overrides are matched on the full partname, defaults on the extension, both
/// ASCII case-insensitively as OPC requires.
struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) =
                                (attr_value(e, b"Extension"), attr_value(e, b"ContentType"))
                            {
                                map.defaults.insert(ext.to_ascii_lowercase(), ct);
                            }
                        },
                        b"Override" => {
                            if let (Some(pn), Some(ct)) =
                                (attr_value(e, b"PartName"), attr_value(e, b"ContentType"))
                            {
                                map.overrides.insert(pn.to_ascii_lowercase(), ct);
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    fn get(&self, pack_uri: &PackURI) -> Option<&str> {
        self.overrides
            .get(&pack_uri.as_str().to_ascii_lowercase())
            .or_else(|| self.defaults.get(&pack_uri.ext().to_ascii_lowercase()))
            .map(String::as_str)
    }
}

/// Parse a `.rels` document.
pub(crate) fn parse_rels_xml(rels_xml: &[u8]) -> Result<SmallVec<[SerializedRelationship; 8]>> {
    let mut srels = SmallVec::new();
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let r_id = attr_value(e, b"Id");
                let reltype = attr_value(e, b"Type");
                let target_ref = attr_value(e, b"Target");
                let target_mode = attr_value(e, b"TargetMode")
                    .unwrap_or_else(|| target_mode::INTERNAL.to_string());

                if let (Some(r_id), Some(reltype), Some(target_ref)) = (r_id, reltype, target_ref) {
                    srels.push(SerializedRelationship {
                        r_id,
                        reltype,
                        target_ref,
                        target_mode,
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(srels)
}

/// Serialized view of a whole package: package relationships plus every part.
pub struct PackageReader {
    pkg_srels: SmallVec<[SerializedRelationship; 8]>,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    pub fn from_phys_reader(phys_reader: &PhysPkgReader) -> Result<Self> {
        let content_types = ContentTypeMap::from_xml(phys_reader.content_types_xml()?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_srels = match phys_reader.rels_xml_for(&package_uri)? {
            Some(xml) => parse_rels_xml(xml)?,
            None => SmallVec::new(),
        };

        let mut sparts = Vec::with_capacity(phys_reader.len());
        for membername in phys_reader.member_names() {
            let partname = PackURI::from_membername(membername);
            if partname.as_str() == CONTENT_TYPES_URI || partname.is_rels() {
                continue;
            }

            let Some(content_type) = content_types.get(&partname) else {
                tracing::debug!(part = %partname, "skipping member without a content type");
                continue;
            };

            let srels = match phys_reader.rels_xml_for(&partname)? {
                Some(xml) => parse_rels_xml(xml)?,
                None => SmallVec::new(),
            };

            sparts.push(SerializedPart {
                blob: phys_reader.blob_for(&partname)?.to_vec(),
                content_type: content_type.to_string(),
                partname,
                srels,
            });
        }

        Ok(Self { pkg_srels, sparts })
    }

    /// Take ownership of package-level relationships.
    pub fn take_pkg_srels(&mut self) -> SmallVec<[SerializedRelationship; 8]> {
        std::mem::take(&mut self.pkg_srels)
    }

    /// Take ownership of all serialized parts.
    pub fn take_sparts(&mut self) -> Vec<SerializedPart> {
        std::mem::take(&mut self.sparts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
            <Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
                <Default Extension="xml" ContentType="application/xml"/>
                <Default Extension="PNG" ContentType="image/png"/>
                <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
            </Types>"#;

        let ct_map = ContentTypeMap::from_xml(xml).unwrap();

        let uri = PackURI::new("/ppt/presProps.xml").unwrap();
        assert_eq!(ct_map.get(&uri), Some("application/xml"));

        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(ct_map.get(&uri), Some("image/png"));

        let uri = PackURI::new("/PPT/Presentation.xml").unwrap();
        assert_eq!(
            ct_map.get(&uri),
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml")
        );

        let uri = PackURI::new("/ppt/fonts/font1.fntdata").unwrap();
        assert_eq!(ct_map.get(&uri), None);
    }

    #[test]
    fn test_parse_rels_xml() {
        let xml = br#"<?xml version="1.0"?>
            <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
                <Relationship Id="rId1" Type="http://x/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
                <Relationship Id="rId2" Type="http://x/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
            </Relationships>"#;

        let srels = parse_rels_xml(xml).unwrap();
        assert_eq!(srels.len(), 2);
        assert!(!srels[0].is_external());
        assert!(srels[1].is_external());
        assert_eq!(srels[1].target_ref, "https://example.com/?a=1&b=2");
    }
}
