//! XML text helpers shared by the package and presentation layers.

mod escape;

pub use escape::{escape_xml, unescape_xml};

use quick_xml::events::BytesStart;

/// Decoded value of the attribute whose qualified name is `key`
/// (e.g. `b"type"` or `b"r:id"`), if present and valid UTF-8.
pub fn attr_value(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .map(unescape_xml)
        })
}

/// Value of a namespaced `id` attribute such as `r:id`.
///
/// Unprefixed `id` attributes (the numeric ids of `sldId`, `sldLayoutId` and
/// friends) are ignored.
pub fn attr_relationship_id(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .map(unescape_xml)
        })
}
