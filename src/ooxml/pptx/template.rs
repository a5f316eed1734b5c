//! Presentation template module.
//!
//! The blank presentation used when neither an existing deck nor a theme is
//! supplied: a 4:3 deck with one master, one theme and six layouts
//! ("Title Slide", "Title and Content", "Section Header", "Two Content",
//! "Title Only", "Blank") and no slides.

use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, XmlPart};

pub fn default_presentation_xml() -> &'static str {
    include_str!("../../../resources/presentation.xml")
}

/// Slide master with title, body, date, footer and slide number placeholders.
pub fn default_slide_master_xml() -> &'static str {
    include_str!("../../../resources/slideMasters/slideMaster1.xml")
}

/// Layout XML in master order; index 1 is "Title and Content".
pub fn default_slide_layouts() -> [&'static str; 6] {
    [
        include_str!("../../../resources/slideLayouts/slideLayout1.xml"),
        include_str!("../../../resources/slideLayouts/slideLayout2.xml"),
        include_str!("../../../resources/slideLayouts/slideLayout3.xml"),
        include_str!("../../../resources/slideLayouts/slideLayout4.xml"),
        include_str!("../../../resources/slideLayouts/slideLayout5.xml"),
        include_str!("../../../resources/slideLayouts/slideLayout6.xml"),
    ]
}

pub fn default_theme_xml() -> &'static str {
    include_str!("../../../resources/theme/theme1.xml")
}

pub fn default_table_styles_xml() -> &'static str {
    include_str!("../../../resources/tableStyles.xml")
}

pub fn default_view_props_xml() -> &'static str {
    include_str!("../../../resources/viewProps.xml")
}

pub fn default_pres_props_xml() -> &'static str {
    include_str!("../../../resources/presProps.xml")
}

pub fn default_core_props_xml() -> &'static str {
    include_str!("../../../resources/docProps/core.xml")
}

pub fn default_app_props_xml() -> &'static str {
    include_str!("../../../resources/docProps/app.xml")
}

fn uri(partname: &str) -> Result<PackURI> {
    PackURI::new(partname).map_err(OpcError::InvalidPackUri)
}

fn xml_part(partname: &PackURI, content_type: &str, xml: &str) -> XmlPart {
    XmlPart::new(
        partname.clone(),
        content_type.to_string(),
        xml.as_bytes().to_vec(),
    )
}

/// Assemble the blank presentation package.
///
/// Relationship ids match the `r:id` references inside the embedded XML:
/// the presentation's master is `rId1`, the master's layouts are `rId1`..`rId6`.
pub fn blank_package() -> Result<OpcPackage> {
    let mut pkg = OpcPackage::new();

    let presentation = uri("/ppt/presentation.xml")?;
    let master = uri("/ppt/slideMasters/slideMaster1.xml")?;
    let theme = uri("/ppt/theme/theme1.xml")?;
    let core = uri("/docProps/core.xml")?;
    let app = uri("/docProps/app.xml")?;

    pkg.relate_to(&presentation, rt::OFFICE_DOCUMENT);
    pkg.relate_to(&core, rt::CORE_PROPERTIES);
    pkg.relate_to(&app, rt::EXTENDED_PROPERTIES);
    pkg.add_part(Box::new(xml_part(
        &core,
        ct::OPC_CORE_PROPERTIES,
        default_core_props_xml(),
    )));
    pkg.add_part(Box::new(xml_part(
        &app,
        ct::OFC_EXTENDED_PROPERTIES,
        default_app_props_xml(),
    )));

    let mut pres_part = xml_part(
        &presentation,
        ct::PML_PRESENTATION_MAIN,
        default_presentation_xml(),
    );
    pres_part.relate_to(&master, rt::SLIDE_MASTER);
    for (partname, content_type, reltype, xml) in [
        (
            "/ppt/presProps.xml",
            ct::PML_PRES_PROPS,
            rt::PRES_PROPS,
            default_pres_props_xml(),
        ),
        (
            "/ppt/viewProps.xml",
            ct::PML_VIEW_PROPS,
            rt::VIEW_PROPS,
            default_view_props_xml(),
        ),
        (
            "/ppt/tableStyles.xml",
            ct::PML_TABLE_STYLES,
            rt::TABLE_STYLES,
            default_table_styles_xml(),
        ),
    ] {
        let partname = uri(partname)?;
        pres_part.relate_to(&partname, reltype);
        pkg.add_part(Box::new(xml_part(&partname, content_type, xml)));
    }
    pres_part.relate_to(&theme, rt::THEME);
    pkg.add_part(Box::new(pres_part));

    let mut master_part = xml_part(&master, ct::PML_SLIDE_MASTER, default_slide_master_xml());
    for (i, layout_xml) in default_slide_layouts().into_iter().enumerate() {
        let layout = uri(&format!("/ppt/slideLayouts/slideLayout{}.xml", i + 1))?;
        master_part.relate_to(&layout, rt::SLIDE_LAYOUT);

        let mut layout_part = xml_part(&layout, ct::PML_SLIDE_LAYOUT, layout_xml);
        layout_part.relate_to(&master, rt::SLIDE_MASTER);
        pkg.add_part(Box::new(layout_part));
    }
    master_part.relate_to(&theme, rt::THEME);
    pkg.add_part(Box::new(master_part));

    pkg.add_part(Box::new(xml_part(&theme, ct::OFC_THEME, default_theme_xml())));

    Ok(pkg)
}
