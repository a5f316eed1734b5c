//! Serializes an in-memory OPC package back to a ZIP archive.
//!
//! Member order is `[Content_Types].xml`, then `_rels/.rels`, then each part
//! in partname order followed by its own `.rels` member when it has one.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;

/// Writes an [`OpcPackage`] to archive bytes.
pub struct PackageWriter;

impl PackageWriter {
    /// Serialize `package` to an in-memory ZIP.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypesItem::from_package(package).to_xml();
        phys_writer.write(&content_types_uri, content_types.as_bytes())?;

        let pkg_rels_uri = PackURI::new(PACKAGE_URI)
            .and_then(|uri| uri.rels_uri())
            .map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&pkg_rels_uri, package.rels().to_xml().as_bytes())?;

        for part in package.iter_parts() {
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri().map_err(OpcError::InvalidPackUri)?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        let bytes = phys_writer.finish()?;
        tracing::debug!(
            parts = package.part_count(),
            bytes = bytes.len(),
            "serialized package"
        );
        Ok(bytes)
    }
}

/// `[Content_Types].xml` builder.
///
/// Well-known extension/content type pairs become `Default` entries, every
/// other part gets an `Override`.
struct ContentTypesItem {
    defaults: BTreeMap<String, &'static str>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), ct::XML);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        match Self::default_content_type(&ext) {
            Some(default_ct) if default_ct == content_type => {
                self.defaults.insert(ext, default_ct);
            },
            _ => {
                self.overrides
                    .insert(partname.to_string(), content_type.to_string());
            },
        }
    }

    fn default_content_type(ext: &str) -> Option<&'static str> {
        match ext {
            "rels" => Some(ct::OPC_RELATIONSHIPS),
            "xml" => Some(ct::XML),
            "png" => Some(ct::PNG),
            "jpg" | "jpeg" => Some(ct::JPEG),
            "gif" => Some(ct::GIF),
            "emf" => Some(ct::X_EMF),
            "wmf" => Some(ct::X_WMF),
            _ => None,
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES));

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}
