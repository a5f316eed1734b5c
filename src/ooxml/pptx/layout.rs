//! Slide layouts as seen by slide creation.

use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::shapes::placeholder::Placeholder;
use crate::resolver::Region;

/// One layout of the first slide master.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    /// Position in the master's `sldLayoutIdLst`
    pub index: usize,
    pub name: String,
    pub partname: PackURI,
    /// Every placeholder of the layout, geometry already inherited from the master
    pub placeholders: Vec<Placeholder>,
}

impl SlideLayout {
    /// Placeholders a new slide receives, in declaration order.
    pub fn cloneable_placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.placeholders.iter().filter(|p| p.is_cloneable())
    }

    /// Region snapshot of the cloneable placeholders.
    ///
    /// Region `i` corresponds to placeholder `i` of a `SlideBuilder` created
    /// from this layout.
    pub fn regions(&self) -> Vec<Region> {
        self.cloneable_placeholders().map(Placeholder::region).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::placeholder::parse_placeholders;
    use crate::resolver::SemanticKind;

    #[test]
    fn test_regions_skip_footer_placeholders() {
        let xml = r#"<p:sldLayout xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm></p:spPr></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="3" name="Slide Number 2"/><p:cNvSpPr/><p:nvPr><p:ph type="sldNum" idx="12"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="4" name="Content 3"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
</p:spTree></p:cSld></p:sldLayout>"#;
        let layout = SlideLayout {
            index: 0,
            name: "Test".to_string(),
            partname: PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            placeholders: parse_placeholders(xml.as_bytes()).unwrap(),
        };

        let regions = layout.regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, SemanticKind::Title);
        assert_eq!((regions[0].top, regions[0].width, regions[0].height), (20, 30, 40));
        assert_eq!(regions[1].kind, SemanticKind::Object);
        assert_eq!(regions[1].area(), 0);
    }
}
