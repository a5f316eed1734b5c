//! Deck fixtures shared by the integration tests.
#![allow(dead_code)]

use paperslide::app::append_slide;
use paperslide::compose::SlideContent;
use paperslide::ooxml::pptx::Package;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// A blank-template deck holding `n` slides.
pub fn deck_with_slides(n: usize) -> Vec<u8> {
    let mut pkg = Package::new().unwrap();
    for i in 0..n {
        let content = SlideContent {
            title: format!("Existing {}", i + 1),
            ..SlideContent::default()
        };
        append_slide(&mut pkg, &content, 1).unwrap();
    }
    pkg.to_bytes().unwrap()
}

pub fn member_names(pptx: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(pptx)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

pub fn read_member(pptx: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(pptx)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

/// Copy `pptx`, passing every member through `edit` (name, content) first
/// and appending `extra` members at the end. Returning `None` drops the member.
fn rebuild<F>(pptx: &[u8], mut edit: F, extra: &[(&str, &[u8])]) -> Vec<u8>
where
    F: FnMut(&str, Vec<u8>) -> Option<Vec<u8>>,
{
    let mut archive = ZipArchive::new(Cursor::new(pptx)).unwrap();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        drop(file);
        if let Some(data) = edit(&name, data) {
            writer.start_file(name, options).unwrap();
            writer.write_all(&data).unwrap();
        }
    }
    for (name, data) in extra {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn rewrite<F>(pptx: &[u8], edit: F) -> Vec<u8>
where
    F: FnMut(&str, Vec<u8>) -> Option<Vec<u8>>,
{
    rebuild(pptx, edit, &[])
}

/// Replace the content of one member.
pub fn replace_member(pptx: &[u8], name: &str, xml: &str) -> Vec<u8> {
    rewrite(pptx, |member, content| {
        Some(if member == name {
            xml.as_bytes().to_vec()
        } else {
            content
        })
    })
}

/// Add an extra member, declaring its extension in `[Content_Types].xml`.
pub fn with_extra_member(
    pptx: &[u8],
    name: &str,
    ext: &str,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let declaration = format!(
        r#"<Default Extension="{}" ContentType="{}"/></Types>"#,
        ext, content_type
    );
    rebuild(
        pptx,
        |member, content| {
            if member == "[Content_Types].xml" {
                let xml = String::from_utf8(content).unwrap();
                Some(xml.replace("</Types>", &declaration).into_bytes())
            } else {
                Some(content)
            }
        },
        &[(name, data)],
    )
}
