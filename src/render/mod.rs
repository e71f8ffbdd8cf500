mod blocks;
mod contents;
mod cover;

use crate::block::{Block, DocumentMetadata, TocEntry};
use crate::config::ExportOptions;
use crate::error::Error;
use crate::model::{
    Alignment, FieldCode, FormattedDocument, HeaderFooter, Paragraph, Run, Section,
    SectionBreakType, SectionKind,
};

use blocks::block_paragraphs;

pub use cover::{advisor_conjunction, nature_statement};

/// Citation text size in points.
pub(crate) const CITATION_FONT_SIZE: f32 = 10.0;
const PAGE_NUMBER_FONT_SIZE: f32 = 10.0;

/// Font settings shared by every paragraph of one export.
#[derive(Clone, Copy)]
pub(crate) struct TextStyle<'a> {
    pub(crate) font_name: &'a str,
    pub(crate) size: f32,
}

impl<'a> TextStyle<'a> {
    fn from_options(options: &'a ExportOptions) -> Self {
        Self {
            font_name: &options.font_name,
            size: options.body_font_size,
        }
    }

    pub(crate) fn run(&self, text: impl Into<String>) -> Run {
        Run::new(text, self.font_name, self.size)
    }

    pub(crate) fn sized_run(&self, text: impl Into<String>, size: f32) -> Run {
        Run::new(text, self.font_name, size)
    }
}

/// Reject metadata that cannot produce the front matter `options` asks for.
pub fn validate(metadata: &DocumentMetadata, options: &ExportOptions) -> Result<(), Error> {
    let mut missing = metadata.missing_fields();
    if options.with_title_page && metadata.advisors.is_empty() {
        missing.push("advisor");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Lay out the whole document: cover, optional title page, optional table of
/// contents, then the body starting on a new page.
///
/// `blocks` should already carry numbering; `toc` is only used when the
/// options ask for a contents page.
pub fn render(
    metadata: &DocumentMetadata,
    blocks: &[Block],
    toc: &[TocEntry],
    options: &ExportOptions,
) -> Result<FormattedDocument, Error> {
    validate(metadata, options)?;

    let style = TextStyle::from_options(options);
    let mut sections = vec![Section {
        kind: SectionKind::Cover,
        break_type: SectionBreakType::NextPage,
        paragraphs: cover::cover_page(metadata, style),
        header: None,
    }];

    if options.with_title_page {
        sections.push(Section {
            kind: SectionKind::TitlePage,
            break_type: SectionBreakType::NextPage,
            paragraphs: cover::title_page(metadata, style),
            header: None,
        });
    }

    if options.include_table_of_contents {
        sections.push(Section {
            kind: SectionKind::Contents,
            break_type: SectionBreakType::NextPage,
            paragraphs: contents::contents_page(toc, style, options.page.text_width()),
            header: None,
        });
    }

    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|b| b.order);
    let body: Vec<Paragraph> = ordered
        .into_iter()
        .flat_map(|b| block_paragraphs(b, style))
        .collect();

    sections.push(Section {
        kind: SectionKind::Body,
        break_type: SectionBreakType::NextPage,
        paragraphs: body,
        header: options.page_numbers.then(|| page_number_header(style)),
    });

    Ok(FormattedDocument {
        page: options.page,
        sections,
        font_name: options.font_name.clone(),
        font_size: options.body_font_size,
        title: metadata.title.trim().to_string(),
        author: metadata.author.trim().to_string(),
    })
}

fn page_number_header(style: TextStyle) -> HeaderFooter {
    let mut number = style.sized_run("", PAGE_NUMBER_FONT_SIZE);
    number.field_code = Some(FieldCode::Page);
    HeaderFooter {
        paragraphs: vec![Paragraph {
            runs: vec![number],
            alignment: Alignment::Right,
            ..Paragraph::default()
        }],
    }
}
