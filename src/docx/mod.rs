//! DOCX encoder: writes a [`FormattedDocument`] as a WordprocessingML package.

mod document;
mod styles;

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Error;
use crate::model::{FormattedDocument, HeaderFooter};

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(super) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const CORE_PROPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

const WML_CT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

/// Turns formatted sections into file bytes.
///
/// The renderer never touches the output format directly; anything that can
/// serialize a [`FormattedDocument`] can stand in for [`DocxEncoder`].
pub trait Encoder {
    fn encode(&self, document: &FormattedDocument) -> Result<Vec<u8>, Error>;
}

#[derive(Clone, Copy, Debug)]
pub struct DocxEncoder {
    compression: CompressionMethod,
}

impl Default for DocxEncoder {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl DocxEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store parts uncompressed, handy when inspecting the output.
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

/// A header part and the relationship id that points at it.
pub(super) struct HeaderPart<'a> {
    pub(super) rel_id: String,
    pub(super) file_name: String,
    pub(super) header: &'a HeaderFooter,
}

impl Encoder for DocxEncoder {
    fn encode(&self, document: &FormattedDocument) -> Result<Vec<u8>, Error> {
        // One header part per section that has one, indexed by section.
        let headers: Vec<Option<HeaderPart>> = {
            let mut next = 0;
            document
                .sections
                .iter()
                .map(|section| {
                    section.header.as_ref().map(|header| {
                        next += 1;
                        HeaderPart {
                            rel_id: format!("rIdHeader{next}"),
                            file_name: format!("header{next}.xml"),
                            header,
                        }
                    })
                })
                .collect()
        };
        let header_parts: Vec<&HeaderPart> = headers.iter().flatten().collect();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);

        let mut part = |name: &str, bytes: Vec<u8>| -> Result<(), Error> {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
            Ok(())
        };

        part("[Content_Types].xml", content_types(&header_parts)?)?;
        part("_rels/.rels", package_rels()?)?;
        part("docProps/core.xml", core_properties(document)?)?;
        part("word/_rels/document.xml.rels", document_rels(&header_parts)?)?;
        part("word/styles.xml", styles::styles_xml(document)?)?;
        part("word/settings.xml", settings_xml()?)?;
        for hp in &header_parts {
            part(&format!("word/{}", hp.file_name), document::header_xml(hp.header)?)?;
        }
        let rel_ids: Vec<Option<&str>> = headers
            .iter()
            .map(|h| h.as_ref().map(|hp| hp.rel_id.as_str()))
            .collect();
        part("word/document.xml", document::document_xml(document, &rel_ids)?)?;

        let bytes = zip.finish()?.into_inner();
        log::debug!(
            "Encoded DOCX: {} sections, {} header parts, {} bytes",
            document.sections.len(),
            header_parts.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Points to twentieths of a point.
pub(super) fn twips(pts: f32) -> String {
    ((pts * 20.0).round() as i64).to_string()
}

/// Points to half-points, the unit of `w:sz`.
pub(super) fn half_points(pts: f32) -> String {
    ((pts * 2.0).round() as i64).to_string()
}

pub(super) fn xml_writer() -> Result<Writer<Vec<u8>>, Error> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(xml)
}

pub(super) fn start(xml: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let mut el = BytesStart::new(name);
    for &attr in attrs {
        el.push_attribute(attr);
    }
    xml.write_event(Event::Start(el))?;
    Ok(())
}

pub(super) fn empty(xml: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let mut el = BytesStart::new(name);
    for &attr in attrs {
        el.push_attribute(attr);
    }
    xml.write_event(Event::Empty(el))?;
    Ok(())
}

pub(super) fn end(xml: &mut Writer<Vec<u8>>, name: &str) -> Result<(), Error> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Characters allowed in XML 1.0 content.
pub(super) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

/// Element with text content. Characters XML cannot carry are dropped.
pub(super) fn text_element(
    xml: &mut Writer<Vec<u8>>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<(), Error> {
    start(xml, name, attrs)?;
    if text.chars().all(is_xml_char) {
        xml.write_event(Event::Text(BytesText::new(text)))?;
    } else {
        let clean: String = text.chars().filter(|&c| is_xml_char(c)).collect();
        xml.write_event(Event::Text(BytesText::new(&clean)))?;
    }
    end(xml, name)
}

fn content_types(headers: &[&HeaderPart]) -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(&mut xml, "Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    empty(
        &mut xml,
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    empty(&mut xml, "Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let mut overrides = vec![
        ("/word/document.xml".to_string(), format!("{WML_CT}.document.main+xml")),
        ("/word/styles.xml".to_string(), format!("{WML_CT}.styles+xml")),
        ("/word/settings.xml".to_string(), format!("{WML_CT}.settings+xml")),
        (
            "/docProps/core.xml".to_string(),
            "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
        ),
    ];
    for hp in headers {
        overrides.push((format!("/word/{}", hp.file_name), format!("{WML_CT}.header+xml")));
    }
    for (part_name, content_type) in &overrides {
        empty(
            &mut xml,
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type.as_str())],
        )?;
    }
    end(&mut xml, "Types")?;
    Ok(xml.into_inner())
}

fn relationships(rels: &[(&str, String, &str)]) -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(&mut xml, "Relationships", &[("xmlns", PKG_REL_NS)])?;
    for (id, rel_type, target) in rels {
        empty(
            &mut xml,
            "Relationship",
            &[("Id", *id), ("Type", rel_type.as_str()), ("Target", *target)],
        )?;
    }
    end(&mut xml, "Relationships")?;
    Ok(xml.into_inner())
}

fn package_rels() -> Result<Vec<u8>, Error> {
    relationships(&[
        ("rId1", format!("{REL_NS}/officeDocument"), "word/document.xml"),
        (
            "rId2",
            format!("{PKG_REL_NS}/metadata/core-properties"),
            "docProps/core.xml",
        ),
    ])
}

fn document_rels(headers: &[&HeaderPart]) -> Result<Vec<u8>, Error> {
    let mut rels = vec![
        ("rIdStyles", format!("{REL_NS}/styles"), "styles.xml"),
        ("rIdSettings", format!("{REL_NS}/settings"), "settings.xml"),
    ];
    for hp in headers {
        rels.push((hp.rel_id.as_str(), format!("{REL_NS}/header"), hp.file_name.as_str()));
    }
    relationships(&rels)
}

fn core_properties(document: &FormattedDocument) -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(
        &mut xml,
        "cp:coreProperties",
        &[("xmlns:cp", CORE_PROPS_NS), ("xmlns:dc", DC_NS)],
    )?;
    text_element(&mut xml, "dc:title", &[], &document.title)?;
    text_element(&mut xml, "dc:creator", &[], &document.author)?;
    end(&mut xml, "cp:coreProperties")?;
    Ok(xml.into_inner())
}

fn settings_xml() -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(&mut xml, "w:settings", &[("xmlns:w", WML_NS)])?;
    // 1.25cm
    empty(&mut xml, "w:defaultTabStop", &[("w:val", "709")])?;
    empty(&mut xml, "w:characterSpacingControl", &[("w:val", "doNotCompress")])?;
    end(&mut xml, "w:settings")?;
    Ok(xml.into_inner())
}
