/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::common::xml::{attr_relationship_id, attr_value, escape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Smallest id PowerPoint accepts in `<p:sldId id>`.
pub const MIN_SLIDE_ID: u32 = 256;
/// Largest id `ST_SlideId` allows.
pub const MAX_SLIDE_ID: u32 = 2_147_483_647;

/// Read-only view of the main presentation part.
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Collect the relationship ids of every `<p:{element}>` entry.
    fn list_rids(&self, element: &[u8]) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == element =>
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

    /// Relationship ids of the slides, in presentation order.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        self.list_rids(b"sldId")
    }

    /// Relationship ids of the slide masters, in declaration order.
    pub fn slide_master_rids(&self) -> Result<Vec<String>> {
        self.list_rids(b"sldMasterId")
    }

    /// Get the number of slides in the presentation.
    ///
    /// This counts the `<p:sldId>` elements in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        Ok(self.slide_rids()?.len())
    }

    /// Id to give the next slide: one past the largest in use, at least 256.
    /// Once the largest allowed id is taken, the lowest free one is used.
    pub fn next_slide_id(&self) -> Result<u32> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut used = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == b"sldId" =>
                {
                    used.extend(attr_value(e, b"id").and_then(|v| v.parse::<u32>().ok()));
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        allocate_slide_id(used)
    }
}

fn allocate_slide_id(mut used: Vec<u32>) -> Result<u32> {
    used.retain(|id| (MIN_SLIDE_ID..=MAX_SLIDE_ID).contains(id));
    used.sort_unstable();
    used.dedup();

    match used.last() {
        None => Ok(MIN_SLIDE_ID),
        Some(&max) if max < MAX_SLIDE_ID => Ok(max + 1),
        Some(_) => {
            // `used` is sorted and unique, so the first id that differs from
            // its position is free
            let mut candidate = MIN_SLIDE_ID;
            for &id in &used {
                if id != candidate {
                    break;
                }
                candidate += 1;
            }
            if candidate <= MAX_SLIDE_ID {
                Ok(candidate)
            } else {
                Err(OoxmlError::InvalidFormat("no free slide id left".to_string()))
            }
        },
    }
}

/// Lists that precede `sldIdLst` in `<p:presentation>`, last one first.
const MASTER_LISTS: [&[u8]; 3] = [
    b"</p:handoutMasterIdLst>",
    b"</p:notesMasterIdLst>",
    b"</p:sldMasterIdLst>",
];

/// Insert `<p:sldId id="{id}" r:id="{r_id}"/>` at the end of `sldIdLst`.
///
/// When the list is absent it is created right after the master id lists.
pub fn insert_slide_id(xml: &[u8], id: u32, r_id: &str) -> Result<Vec<u8>> {
    let entry = format!(r#"<p:sldId id="{}" r:id="{}"/>"#, id, escape_xml(r_id));

    let (pos, insert) = if let Some(pos) = memmem::find(xml, b"</p:sldIdLst>") {
        (pos, entry)
    } else if let Some(pos) = find_self_closing(xml, b"<p:sldIdLst") {
        // `<p:sldIdLst/>`: replace the empty element with a filled one.
        let end = pos.1;
        let mut out = Vec::with_capacity(xml.len() + entry.len() + 32);
        out.extend_from_slice(&xml[..pos.0]);
        out.extend_from_slice(b"<p:sldIdLst>");
        out.extend_from_slice(entry.as_bytes());
        out.extend_from_slice(b"</p:sldIdLst>");
        out.extend_from_slice(&xml[end..]);
        return Ok(out);
    } else {
        let anchor = MASTER_LISTS
            .iter()
            .find_map(|close| memmem::find(xml, close).map(|p| p + close.len()))
            .ok_or_else(|| {
                OoxmlError::InvalidFormat("presentation has no sldMasterIdLst".to_string())
            })?;
        (anchor, format!("<p:sldIdLst>{}</p:sldIdLst>", entry))
    };

    let mut out = Vec::with_capacity(xml.len() + insert.len());
    out.extend_from_slice(&xml[..pos]);
    out.extend_from_slice(insert.as_bytes());
    out.extend_from_slice(&xml[pos..]);
    Ok(out)
}

/// Byte range of a self-closing element starting with `open`, if any.
fn find_self_closing(xml: &[u8], open: &[u8]) -> Option<(usize, usize)> {
    let start = memmem::find(xml, open)?;
    let close = start + memchr::memchr(b'>', &xml[start..])?;
    (close > start && xml[close - 1] == b'/').then_some((start, close + 1))
}
