use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};

use crate::error::Error;
use crate::model::{
    Alignment, FieldCode, FormattedDocument, HeaderFooter, LineSpacing, PageSetup, Paragraph, Run,
    SectionBreakType, TabAlignment,
};

use super::{
    REL_NS, WML_NS, empty, end, half_points, is_xml_char, start, text_element, twips, xml_writer,
};

type Xml = Writer<Vec<u8>>;

fn alignment_val(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

/// Section properties for one section. `header_rel` links the default header.
struct SectionProps<'a> {
    break_type: SectionBreakType,
    header_rel: Option<&'a str>,
}

fn write_sect_pr(xml: &mut Xml, page: &PageSetup, props: &SectionProps) -> Result<(), Error> {
    start(xml, "w:sectPr", &[])?;
    if let Some(rel) = props.header_rel {
        empty(xml, "w:headerReference", &[("w:type", "default"), ("r:id", rel)])?;
    }
    let break_val = match props.break_type {
        SectionBreakType::NextPage => "nextPage",
        SectionBreakType::Continuous => "continuous",
    };
    empty(xml, "w:type", &[("w:val", break_val)])?;
    empty(
        xml,
        "w:pgSz",
        &[("w:w", twips(page.page_width).as_str()), ("w:h", twips(page.page_height).as_str())],
    )?;
    empty(
        xml,
        "w:pgMar",
        &[
            ("w:top", twips(page.margin_top).as_str()),
            ("w:right", twips(page.margin_right).as_str()),
            ("w:bottom", twips(page.margin_bottom).as_str()),
            ("w:left", twips(page.margin_left).as_str()),
            ("w:header", twips(page.header_margin).as_str()),
            ("w:footer", twips(page.footer_margin).as_str()),
            ("w:gutter", "0"),
        ],
    )?;
    end(xml, "w:sectPr")
}

fn write_paragraph_props(
    xml: &mut Xml,
    para: &Paragraph,
    sect: Option<(&PageSetup, &SectionProps)>,
) -> Result<(), Error> {
    start(xml, "w:pPr", &[])?;

    if let Some(level) = para.heading_level {
        empty(xml, "w:pStyle", &[("w:val", format!("Heading{level}").as_str())])?;
    }
    if para.keep_next {
        empty(xml, "w:keepNext", &[])?;
    }
    if para.page_break_before {
        empty(xml, "w:pageBreakBefore", &[])?;
    }

    if !para.tab_stops.is_empty() {
        start(xml, "w:tabs", &[])?;
        for tab in &para.tab_stops {
            let val = match tab.alignment {
                TabAlignment::Left => "left",
                TabAlignment::Right => "right",
            };
            let leader = match tab.leader {
                Some('.') => "dot",
                Some('-') => "hyphen",
                Some('_') => "underscore",
                _ => "none",
            };
            empty(
                xml,
                "w:tab",
                &[("w:val", val), ("w:leader", leader), ("w:pos", twips(tab.position).as_str())],
            )?;
        }
        end(xml, "w:tabs")?;
    }

    let (line, rule) = match para.line_spacing {
        LineSpacing::Auto(mult) => (((mult * 240.0).round() as i64).to_string(), "auto"),
        LineSpacing::Exact(pts) => (twips(pts), "exact"),
    };
    empty(
        xml,
        "w:spacing",
        &[
            ("w:before", twips(para.space_before).as_str()),
            ("w:after", twips(para.space_after).as_str()),
            ("w:line", line.as_str()),
            ("w:lineRule", rule),
        ],
    )?;

    if para.indent_left != 0.0 || para.indent_hanging != 0.0 || para.indent_first_line != 0.0 {
        let left = twips(para.indent_left);
        let mut attrs = vec![("w:left", left.as_str())];
        let hanging = twips(para.indent_hanging);
        let first_line = twips(para.indent_first_line);
        if para.indent_hanging != 0.0 {
            attrs.push(("w:hanging", hanging.as_str()));
        } else if para.indent_first_line != 0.0 {
            attrs.push(("w:firstLine", first_line.as_str()));
        }
        empty(xml, "w:ind", &attrs)?;
    }

    empty(xml, "w:jc", &[("w:val", alignment_val(para.alignment))])?;

    if let Some((page, props)) = sect {
        write_sect_pr(xml, page, props)?;
    }

    end(xml, "w:pPr")
}

fn write_run_props(xml: &mut Xml, run: &Run) -> Result<(), Error> {
    start(xml, "w:rPr", &[])?;
    empty(
        xml,
        "w:rFonts",
        &[
            ("w:ascii", run.font_name.as_str()),
            ("w:hAnsi", run.font_name.as_str()),
            ("w:cs", run.font_name.as_str()),
        ],
    )?;
    if run.bold {
        empty(xml, "w:b", &[])?;
    }
    if run.italic {
        empty(xml, "w:i", &[])?;
    }
    let size = half_points(run.font_size);
    empty(xml, "w:sz", &[("w:val", size.as_str())])?;
    empty(xml, "w:szCs", &[("w:val", size.as_str())])?;
    end(xml, "w:rPr")
}

fn write_text_segment(xml: &mut Xml, text: &str) -> Result<(), Error> {
    if text.is_empty() {
        return Ok(());
    }
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        start(xml, "w:t", &[("xml:space", "preserve")])?;
        xml.write_event(Event::Text(BytesText::new(text)))?;
        end(xml, "w:t")
    } else {
        text_element(xml, "w:t", &[], text)
    }
}

/// Run content: tabs become `w:tab`, line breaks (including the vertical tab
/// Word uses for manual breaks) become `w:br`, and characters XML cannot
/// carry are dropped.
fn write_text(xml: &mut Xml, text: &str) -> Result<(), Error> {
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let element = match c {
            '\t' => "w:tab",
            '\r' => {
                chars.next_if_eq(&'\n');
                "w:br"
            }
            '\n' | '\u{b}' | '\u{c}' => "w:br",
            c if is_xml_char(c) => {
                segment.push(c);
                continue;
            }
            _ => continue,
        };
        write_text_segment(xml, &segment)?;
        segment.clear();
        empty(xml, element, &[])?;
    }
    write_text_segment(xml, &segment)
}

fn write_run(xml: &mut Xml, run: &Run) -> Result<(), Error> {
    if let Some(FieldCode::Page) = run.field_code {
        start(xml, "w:fldSimple", &[("w:instr", " PAGE ")])?;
        start(xml, "w:r", &[])?;
        write_run_props(xml, run)?;
        // Cached value, replaced when the field is updated.
        write_text(xml, if run.text.is_empty() { "1" } else { run.text.as_str() })?;
        end(xml, "w:r")?;
        return end(xml, "w:fldSimple");
    }

    start(xml, "w:r", &[])?;
    write_run_props(xml, run)?;
    if run.tab_before {
        empty(xml, "w:tab", &[])?;
    }
    if !run.text.is_empty() {
        write_text(xml, &run.text)?;
    }
    end(xml, "w:r")
}

fn write_paragraph(
    xml: &mut Xml,
    para: &Paragraph,
    sect: Option<(&PageSetup, &SectionProps)>,
) -> Result<(), Error> {
    start(xml, "w:p", &[])?;
    write_paragraph_props(xml, para, sect)?;
    for run in &para.runs {
        write_run(xml, run)?;
    }
    end(xml, "w:p")
}

fn root_attrs() -> [(&'static str, &'static str); 2] {
    [("xmlns:w", WML_NS), ("xmlns:r", REL_NS)]
}

/// `word/document.xml`. `header_rels[i]` is the header relationship of section `i`.
///
/// Every section but the last closes with its `w:sectPr` inside the pPr of
/// its final paragraph; the last one is described by the body-level sectPr.
pub(super) fn document_xml(
    document: &FormattedDocument,
    header_rels: &[Option<&str>],
) -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(&mut xml, "w:document", &root_attrs())?;
    start(&mut xml, "w:body", &[])?;

    let last = document.sections.len().saturating_sub(1);
    for (idx, section) in document.sections.iter().enumerate() {
        let props = SectionProps {
            break_type: section.break_type,
            header_rel: header_rels.get(idx).copied().flatten(),
        };

        if idx == last {
            for para in &section.paragraphs {
                write_paragraph(&mut xml, para, None)?;
            }
            write_sect_pr(&mut xml, &document.page, &props)?;
            continue;
        }

        match section.paragraphs.split_last() {
            Some((closing, rest)) => {
                for para in rest {
                    write_paragraph(&mut xml, para, None)?;
                }
                write_paragraph(&mut xml, closing, Some((&document.page, &props)))?;
            }
            None => {
                write_paragraph(&mut xml, &Paragraph::default(), Some((&document.page, &props)))?;
            }
        }
    }

    if document.sections.is_empty() {
        let props = SectionProps {
            break_type: SectionBreakType::NextPage,
            header_rel: None,
        };
        write_sect_pr(&mut xml, &document.page, &props)?;
    }

    end(&mut xml, "w:body")?;
    end(&mut xml, "w:document")?;
    Ok(xml.into_inner())
}

pub(super) fn header_xml(header: &HeaderFooter) -> Result<Vec<u8>, Error> {
    let mut xml = xml_writer()?;
    start(&mut xml, "w:hdr", &root_attrs())?;
    for para in &header.paragraphs {
        write_paragraph(&mut xml, para, None)?;
    }
    end(&mut xml, "w:hdr")?;
    Ok(xml.into_inner())
}
