//! In-memory OPC package.
//!
//! `OpcPackage` owns every part of a loaded (or freshly templated) package
//! together with the package-level relationships. Parts are kept in partname
//! order so serialization is deterministic.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::path::Path;

/// Main API class for working with OPC packages.
#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: BTreeMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: BTreeMap::new(),
        }
    }

    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(&phys_reader)
    }

    /// Load an OPC package from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys_reader = PhysPkgReader::new(reader)?;
        Self::from_phys_reader(&phys_reader)
    }

    /// Load an OPC package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let phys_reader = PhysPkgReader::from_bytes(data)?;
        Self::from_phys_reader(&phys_reader)
    }

    fn from_phys_reader(phys_reader: &PhysPkgReader) -> Result<Self> {
        let pkg_reader = PackageReader::from_phys_reader(phys_reader)?;
        Self::unmarshal(pkg_reader)
    }

    /// Turn serialized parts and relationships into the in-memory part graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.take_pkg_srels() {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            package.add_part(part);
        }

        tracing::debug!(parts = package.part_count(), "unmarshalled package");
        Ok(package)
    }

    /// The part the package's `officeDocument` relationship points at.
    ///
    /// For PowerPoint, this is `/ppt/presentation.xml`.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    /// Partname of the main document part.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a part, replacing any part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    /// Iterate over all parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Relate the package to a part, returning the rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        let target_ref = partname.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref).r_id().to_string()
    }

    /// First free partname for a numbered template such as `/ppt/slides/slide%d.xml`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        (1..=self.parts.len() + 1)
            .map(|n| template.replace("%d", &n.to_string()))
            .find_map(|candidate| {
                PackURI::new(candidate)
                    .ok()
                    .filter(|uri| !self.parts.contains_key(uri))
            })
            .ok_or_else(|| {
                OpcError::InvalidPackUri(format!("no free partname for template '{}'", template))
            })
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::part::XmlPart;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_pptx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="bin" ContentType="application/octet-stream"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer
                .write_all(br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#)
                .unwrap();

            // Not reachable through any relationship; must survive anyway.
            writer.start_file("customData/orphan.bin", options).unwrap();
            writer.write_all(&[1, 2, 3]).unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_open_package_keeps_unreferenced_parts() {
        let pkg = OpcPackage::from_bytes(create_minimal_pptx()).unwrap();
        assert_eq!(pkg.part_count(), 2);
        let orphan = PackURI::new("/customData/orphan.bin").unwrap();
        assert_eq!(pkg.get_part(&orphan).unwrap().blob(), &[1, 2, 3]);
    }

    #[test]
    fn test_main_document_part() {
        let pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        let main_part = pkg.main_document_part().unwrap();
        assert_eq!(main_part.content_type(), ct::PML_PRESENTATION_MAIN);
    }

    #[test]
    fn test_next_partname() {
        let mut pkg = OpcPackage::new();
        assert_eq!(
            pkg.next_partname("/ppt/slides/slide%d.xml").unwrap().as_str(),
            "/ppt/slides/slide1.xml"
        );
        for n in [1, 2, 4] {
            pkg.add_part(Box::new(XmlPart::new(
                PackURI::new(format!("/ppt/slides/slide{}.xml", n)).unwrap(),
                ct::PML_SLIDE.to_string(),
                Vec::new(),
            )));
        }
        assert_eq!(
            pkg.next_partname("/ppt/slides/slide%d.xml").unwrap().as_str(),
            "/ppt/slides/slide3.xml"
        );
    }

    #[test]
    fn test_round_trip_bytes() {
        let pkg = OpcPackage::from_bytes(create_minimal_pptx()).unwrap();
        let reopened = OpcPackage::from_bytes(pkg.to_bytes().unwrap()).unwrap();
        assert_eq!(reopened.part_count(), pkg.part_count());
        assert!(reopened.main_document_part().is_ok());
    }
}
