use crate::block::HeadingLevel;
use crate::error::Error;
use crate::model::FormattedDocument;

use super::{WML_NS, empty, end, half_points, start, twips, xml_writer};

type Xml = quick_xml::Writer<Vec<u8>>;

struct StyleDefaults<'a> {
    font_size: f32,
    font_name: &'a str,
    space_after: f32,
    line_spacing: f32, // multiplier, written as w:spacing @line / 240
}

/// One `w:style` of type paragraph.
struct ParagraphStyle {
    id: String,
    name: String,
    based_on: Option<&'static str>,
    bold: bool,
    keep_next: bool,
    outline_level: Option<u8>,
}

fn heading_style(level: u8) -> ParagraphStyle {
    ParagraphStyle {
        id: format!("Heading{level}"),
        name: format!("heading {level}"),
        based_on: Some("Normal"),
        bold: true,
        keep_next: true,
        outline_level: Some(level - 1),
    }
}

fn write_defaults(xml: &mut Xml, defaults: &StyleDefaults) -> Result<(), Error> {
    start(xml, "w:docDefaults", &[])?;

    start(xml, "w:rPrDefault", &[])?;
    start(xml, "w:rPr", &[])?;
    empty(
        xml,
        "w:rFonts",
        &[
            ("w:ascii", defaults.font_name),
            ("w:hAnsi", defaults.font_name),
            ("w:cs", defaults.font_name),
        ],
    )?;
    let size = half_points(defaults.font_size);
    empty(xml, "w:sz", &[("w:val", size.as_str())])?;
    empty(xml, "w:szCs", &[("w:val", size.as_str())])?;
    empty(xml, "w:lang", &[("w:val", "pt-BR")])?;
    end(xml, "w:rPr")?;
    end(xml, "w:rPrDefault")?;

    start(xml, "w:pPrDefault", &[])?;
    start(xml, "w:pPr", &[])?;
    let line = ((defaults.line_spacing * 240.0).round() as i64).to_string();
    empty(
        xml,
        "w:spacing",
        &[
            ("w:after", twips(defaults.space_after).as_str()),
            ("w:line", line.as_str()),
            ("w:lineRule", "auto"),
        ],
    )?;
    end(xml, "w:pPr")?;
    end(xml, "w:pPrDefault")?;

    end(xml, "w:docDefaults")
}

fn write_paragraph_style(xml: &mut Xml, style: &ParagraphStyle, is_default: bool) -> Result<(), Error> {
    let mut attrs = vec![("w:type", "paragraph"), ("w:styleId", style.id.as_str())];
    if is_default {
        attrs.push(("w:default", "1"));
    }
    start(xml, "w:style", &attrs)?;
    empty(xml, "w:name", &[("w:val", style.name.as_str())])?;
    if let Some(base) = style.based_on {
        empty(xml, "w:basedOn", &[("w:val", base)])?;
        empty(xml, "w:next", &[("w:val", "Normal")])?;
    }
    empty(xml, "w:qFormat", &[])?;

    if style.keep_next || style.outline_level.is_some() {
        start(xml, "w:pPr", &[])?;
        if style.keep_next {
            empty(xml, "w:keepNext", &[])?;
        }
        if let Some(lvl) = style.outline_level {
            empty(xml, "w:outlineLvl", &[("w:val", lvl.to_string().as_str())])?;
        }
        end(xml, "w:pPr")?;
    }
    if style.bold {
        start(xml, "w:rPr", &[])?;
        empty(xml, "w:b", &[])?;
        end(xml, "w:rPr")?;
    }

    end(xml, "w:style")
}

/// `word/styles.xml`: document defaults, Normal, and Heading1-5 carrying the
/// outline levels that Word's own navigation and TOC fields read.
pub(super) fn styles_xml(document: &FormattedDocument) -> Result<Vec<u8>, Error> {
    let defaults = StyleDefaults {
        font_size: document.font_size,
        font_name: &document.font_name,
        space_after: 0.0,
        line_spacing: 1.0,
    };

    let mut xml = xml_writer()?;
    start(&mut xml, "w:styles", &[("xmlns:w", WML_NS)])?;
    write_defaults(&mut xml, &defaults)?;

    let normal = ParagraphStyle {
        id: "Normal".to_string(),
        name: "Normal".to_string(),
        based_on: None,
        bold: false,
        keep_next: false,
        outline_level: None,
    };
    write_paragraph_style(&mut xml, &normal, true)?;
    for level in 1..=HeadingLevel::MAX {
        write_paragraph_style(&mut xml, &heading_style(level), false)?;
    }

    start(
        &mut xml,
        "w:style",
        &[("w:type", "character"), ("w:default", "1"), ("w:styleId", "DefaultParagraphFont")],
    )?;
    empty(&mut xml, "w:name", &[("w:val", "Default Paragraph Font")])?;
    empty(&mut xml, "w:uiPriority", &[("w:val", "1")])?;
    end(&mut xml, "w:style")?;

    end(&mut xml, "w:styles")?;
    Ok(xml.into_inner())
}
