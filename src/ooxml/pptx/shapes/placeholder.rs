/// Placeholder shapes declared by slide layouts and masters.
use crate::common::xml::attr_value;
use crate::ooxml::error::{OoxmlError, Result};
use crate::resolver::{Region, SemanticKind};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Value of the `type` attribute of `<p:ph>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    Title,
    CenterTitle,
    Subtitle,
    Body,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    SlideImage,
    Picture,
    Date,
    Footer,
    SlideNumber,
    Header,
}

impl PlaceholderType {
    /// Parse a `type` attribute. Absent or unknown values mean `obj`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("title") => Self::Title,
            Some("ctrTitle") => Self::CenterTitle,
            Some("subTitle") => Self::Subtitle,
            Some("body") => Self::Body,
            Some("chart") => Self::Chart,
            Some("tbl") => Self::Table,
            Some("clipArt") => Self::ClipArt,
            Some("dgm") => Self::Diagram,
            Some("media") => Self::Media,
            Some("sldImg") => Self::SlideImage,
            Some("pic") => Self::Picture,
            Some("dt") => Self::Date,
            Some("ftr") => Self::Footer,
            Some("sldNum") => Self::SlideNumber,
            Some("hdr") => Self::Header,
            _ => Self::Object,
        }
    }

    /// Master placeholder a layout placeholder of this kind takes its position from.
    pub fn inheritance_base(self) -> Self {
        match self {
            Self::Title | Self::CenterTitle => Self::Title,
            Self::Date => Self::Date,
            Self::Footer => Self::Footer,
            Self::SlideNumber => Self::SlideNumber,
            _ => Self::Body,
        }
    }
}

/// Element a placeholder is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeElement {
    /// `<p:sp>`
    Shape,
    /// `<p:pic>`
    Picture,
    /// `<p:graphicFrame>`
    GraphicFrame,
}

impl ShapeElement {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(Self::Shape),
            b"pic" => Some(Self::Picture),
            b"graphicFrame" => Some(Self::GraphicFrame),
            _ => None,
        }
    }
}

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// A placeholder shape parsed from a layout or master.
#[derive(Debug, Clone)]
pub struct Placeholder {
    pub kind: PlaceholderType,
    pub idx: u32,
    /// `orient="vert"`
    pub vertical: bool,
    pub element: ShapeElement,
    /// `cNvPr` id
    pub id: u32,
    /// `cNvPr` name
    pub name: String,
    /// Own `<a:xfrm>`, if the shape declares one
    pub geometry: Option<Geometry>,
    /// Attributes of `<p:ph>` as written in the source, still escaped
    ph_attrs: String,
}

impl Placeholder {
    pub fn semantic_kind(&self) -> SemanticKind {
        match (self.kind, self.vertical) {
            (PlaceholderType::Title, true) => SemanticKind::VerticalTitle,
            (PlaceholderType::Title, false) => SemanticKind::Title,
            (PlaceholderType::CenterTitle, _) => SemanticKind::CenterTitle,
            (PlaceholderType::Body | PlaceholderType::Object, true) => SemanticKind::VerticalBody,
            (PlaceholderType::Body, false) => SemanticKind::Body,
            (PlaceholderType::Object, false) => SemanticKind::Object,
            (PlaceholderType::Subtitle, _) => SemanticKind::Subtitle,
            (PlaceholderType::Date, _) => SemanticKind::Date,
            (PlaceholderType::Footer, _) => SemanticKind::Footer,
            (PlaceholderType::SlideNumber, _) => SemanticKind::SlideNumber,
            (PlaceholderType::Header, _) => SemanticKind::Header,
            _ => SemanticKind::Unclassified,
        }
    }

    /// Date, footer and slide number placeholders are not copied onto new slides.
    #[inline]
    pub fn is_cloneable(&self) -> bool {
        !matches!(
            self.kind,
            PlaceholderType::Date | PlaceholderType::Footer | PlaceholderType::SlideNumber
        )
    }

    /// The `<p:ph .../>` element to reference this placeholder from a slide.
    pub fn ph_element(&self) -> String {
        if self.ph_attrs.is_empty() {
            "<p:ph/>".to_string()
        } else {
            format!("<p:ph {}/>", self.ph_attrs)
        }
    }

    /// Snapshot for the resolver. Missing geometry reads as an empty rectangle.
    ///
    /// Every placeholder is cloned onto a slide as a `<p:sp>` with its own
    /// text body, so picture, chart and table placeholders take text too.
    pub fn region(&self) -> Region {
        let geometry = self.geometry.unwrap_or_default();
        Region {
            kind: self.semantic_kind(),
            top: geometry.y,
            width: geometry.cx,
            height: geometry.cy,
            supports_text: true,
        }
    }
}

/// Shape being collected while walking `spTree`.
#[derive(Default)]
struct PendingShape {
    id: u32,
    name: String,
    ph: Option<(PlaceholderType, u32, bool, String)>,
    off: Option<(i64, i64)>,
    ext: Option<(i64, i64)>,
}

fn parse_i64(element: &BytesStart<'_>, key: &[u8]) -> i64 {
    attr_value(element, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn raw_attrs(element: &BytesStart<'_>) -> Result<String> {
    let mut out = String::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        let value = std::str::from_utf8(&attr.value).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    Ok(out)
}

/// Walks `spTree`, collecting placeholders among its direct children.
#[derive(Default)]
struct SpTreeWalker {
    /// Number of currently open elements
    depth: usize,
    tree_depth: Option<usize>,
    current: Option<(ShapeElement, usize, PendingShape)>,
    in_xfrm: bool,
    placeholders: Vec<Placeholder>,
}

impl SpTreeWalker {
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        let local = e.local_name();
        let local = local.as_ref();
        let own_depth = self.depth + 1;

        if self.tree_depth.is_none() {
            if local == b"spTree" {
                self.tree_depth = Some(own_depth);
            }
        } else if self.current.is_none() {
            let is_child = self.tree_depth.map(|d| d + 1) == Some(own_depth);
            if let Some(element) = ShapeElement::from_local_name(local).filter(|_| is_child) {
                if !is_empty {
                    self.current = Some((element, own_depth, PendingShape::default()));
                }
            }
        } else if let Some((_, _, shape)) = self.current.as_mut() {
            match local {
                b"cNvPr" if shape.id == 0 && shape.name.is_empty() => {
                    shape.id = attr_value(e, b"id")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    shape.name = attr_value(e, b"name").unwrap_or_default();
                },
                b"ph" if shape.ph.is_none() => {
                    let kind = PlaceholderType::from_attr(attr_value(e, b"type").as_deref());
                    let idx = attr_value(e, b"idx")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    let vertical = attr_value(e, b"orient").as_deref() == Some("vert");
                    shape.ph = Some((kind, idx, vertical, raw_attrs(e)?));
                },
                b"xfrm" if shape.off.is_none() => self.in_xfrm = !is_empty,
                b"off" if self.in_xfrm => {
                    shape.off = Some((parse_i64(e, b"x"), parse_i64(e, b"y")));
                },
                b"ext" if self.in_xfrm => {
                    shape.ext = Some((parse_i64(e, b"cx"), parse_i64(e, b"cy")));
                },
                _ => {},
            }
        }

        if !is_empty {
            self.depth = own_depth;
        }
        Ok(())
    }

    /// Handle an end tag; returns true once `spTree` is closed.
    fn close(&mut self, local: &[u8]) -> bool {
        if local == b"xfrm" {
            self.in_xfrm = false;
        }
        if self.current.as_ref().map(|(_, d, _)| *d) == Some(self.depth) {
            if let Some((element, _, shape)) = self.current.take() {
                self.placeholders.extend(finish_shape(element, shape));
            }
        }
        if self.tree_depth == Some(self.depth) {
            return true;
        }
        self.depth = self.depth.saturating_sub(1);
        false
    }
}

/// Placeholders that are direct children of the part's `spTree`, in
/// declaration order.
pub fn parse_placeholders(xml: &[u8]) -> Result<Vec<Placeholder>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut walker = SpTreeWalker::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => walker.open(e, false)?,
            Event::Empty(ref e) => walker.open(e, true)?,
            Event::End(ref e) => {
                if walker.close(e.local_name().as_ref()) {
                    break;
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(walker.placeholders)
}

fn finish_shape(element: ShapeElement, shape: PendingShape) -> Option<Placeholder> {
    let (kind, idx, vertical, ph_attrs) = shape.ph?;
    let geometry = match (shape.off, shape.ext) {
        (Some((x, y)), Some((cx, cy))) => Some(Geometry { x, y, cx, cy }),
        _ => None,
    };
    Some(Placeholder {
        kind,
        idx,
        vertical,
        element,
        id: shape.id,
        name: shape.name,
        geometry,
        ph_attrs,
    })
}

/// Fill in missing layout geometry from the master's placeholders.
pub fn inherit_geometry(layout: &mut [Placeholder], master: &[Placeholder]) {
    for placeholder in layout.iter_mut().filter(|p| p.geometry.is_none()) {
        let base = placeholder.kind.inheritance_base();
        placeholder.geometry = master
            .iter()
            .find(|m| m.kind == base)
            .and_then(|m| m.geometry);
    }
}
