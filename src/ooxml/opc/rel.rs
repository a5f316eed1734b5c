use crate::common::xml::escape_xml;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// Every part (and the package itself) owns one `Relationships` collection,
/// serialized to the matching `_rels/*.rels` member.
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A single relationship from a source part to a target.
///
/// Internal targets are relative part references resolved against the source
/// part's directory; external targets are URLs kept verbatim.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no target partname",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Numeric suffix of an `rIdN` identifier.
fn r_id_number(r_id: &str) -> Option<u32> {
    r_id.strip_prefix("rId")
        .and_then(|digits| atoi_simd::parse_pos::<u32, false>(digits.as_bytes()).ok())
}

/// Collection of relationships from a single source, keyed by rId.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    ///
    /// # Arguments
    /// * `base_uri` - Directory of the source part, used to resolve targets
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Add a relationship, replacing any existing one with the same rId.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        match self.rels.entry(r_id) {
            Entry::Occupied(mut slot) => {
                slot.insert(rel);
                slot.into_mut()
            },
            Entry::Vacant(slot) => slot.insert(rel),
        }
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get or add an internal relationship to `target_ref`.
    ///
    /// An existing relationship of the same type and target is reused; otherwise
    /// a new one is created with the next free rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> &Relationship {
        let existing = self
            .rels
            .values()
            .find(|rel| {
                !rel.is_external() && rel.reltype() == reltype && rel.target_ref() == target_ref
            })
            .map(|rel| rel.r_id().to_string());

        let r_id = existing.unwrap_or_else(|| self.next_r_id());
        if self.rels.contains_key(&r_id) {
            return &self.rels[&r_id];
        }
        self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id, false)
    }

    /// First unused `rIdN`, filling gaps left by removed relationships.
    pub fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self.rels.keys().filter_map(|k| r_id_number(k)).collect();
        used.sort_unstable();
        used.dedup();

        let mut next = 1u32;
        for n in used {
            if n == next {
                next += 1;
            } else if n > next {
                break;
            }
        }
        format!("rId{}", next)
    }

    /// The single relationship of `reltype`.
    ///
    /// Errors when none or more than one exists.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to `.rels` XML, ordered by numeric rId for stable output.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by(|a, b| {
            r_id_number(a.r_id())
                .cmp(&r_id_number(b.r_id()))
                .then_with(|| a.r_id().cmp(b.r_id()))
        });

        for rel in rels {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r_id_number() {
        assert_eq!(r_id_number("rId12"), Some(12));
        assert_eq!(r_id_number("rId"), None);
        assert_eq!(r_id_number("rIdA"), None);
        assert_eq!(r_id_number("Id1"), None);
    }

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship("t".into(), "a.xml".into(), "rId1".into(), false);
        rels.add_relationship("t".into(), "c.xml".into(), "rId3".into(), false);
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        let first = rels
            .get_or_add("layout", "../slideLayouts/slideLayout1.xml")
            .r_id()
            .to_string();
        let second = rels
            .get_or_add("layout", "../slideLayouts/slideLayout1.xml")
            .r_id()
            .to_string();
        assert_eq!(first, second);
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_target_partname() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        let rel = rels.get_or_add("layout", "../slideLayouts/slideLayout2.xml");
        assert_eq!(
            rel.target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout2.xml"
        );
    }

    #[test]
    fn test_part_with_reltype() {
        let mut rels = Relationships::default();
        assert!(rels.part_with_reltype("doc").is_err());
        rels.add_relationship("doc".into(), "ppt/presentation.xml".into(), "rId1".into(), false);
        assert_eq!(rels.part_with_reltype("doc").unwrap().r_id(), "rId1");
        rels.add_relationship("doc".into(), "ppt/other.xml".into(), "rId2".into(), false);
        assert!(matches!(
            rels.part_with_reltype("doc"),
            Err(OpcError::InvalidRelationship(_))
        ));
    }

    #[test]
    fn test_to_xml_orders_numerically_and_marks_external() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        rels.add_relationship("t".into(), "b.xml".into(), "rId10".into(), false);
        rels.add_relationship("h".into(), "https://a&b".into(), "rId2".into(), true);

        let xml = rels.to_xml();
        let pos2 = xml.find(r#"Id="rId2""#).unwrap();
        let pos10 = xml.find(r#"Id="rId10""#).unwrap();
        assert!(pos2 < pos10);
        assert!(xml.contains(r#"Target="https://a&amp;b" TargetMode="External""#));
    }
}
