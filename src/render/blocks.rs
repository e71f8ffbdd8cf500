use crate::block::{Block, BlockKind};
use crate::model::{Alignment, LineSpacing, Paragraph, cm};

use super::{CITATION_FONT_SIZE, TextStyle};

const BODY_SPACE_AFTER: f32 = 12.0;
const REFERENCE_SPACE_AFTER: f32 = 6.0;

fn body_indent() -> f32 {
    cm(1.25)
}

/// Heading text as printed in the body: "2.1 Method", or the bare content
/// when the heading is unnumbered.
fn heading_text(block: &Block) -> String {
    match block.heading.as_ref() {
        Some(h) if h.numbered => match h.numbering.as_deref() {
            Some(n) if !n.is_empty() => format!("{n} {}", block.content.trim()),
            _ => block.content.trim().to_string(),
        },
        _ => block.content.trim().to_string(),
    }
}

/// Paragraphs for one block. Unknown block types produce none.
pub(crate) fn block_paragraphs(block: &Block, style: TextStyle) -> Vec<Paragraph> {
    match block.kind {
        BlockKind::Title => vec![Paragraph {
            runs: vec![style.run(heading_text(block)).bold()],
            space_before: 24.0,
            space_after: 12.0,
            heading_level: Some(block.level().map_or(1, |l| l.get())),
            keep_next: true,
            ..Paragraph::default()
        }],
        BlockKind::Subtitle => vec![Paragraph {
            runs: vec![style.run(heading_text(block)).bold()],
            space_before: 18.0,
            space_after: 9.0,
            heading_level: Some(block.level().map_or(2, |l| l.get())),
            keep_next: true,
            ..Paragraph::default()
        }],
        BlockKind::Paragraph => vec![Paragraph {
            runs: vec![style.run(block.content.as_str())],
            space_after: BODY_SPACE_AFTER,
            alignment: Alignment::Justify,
            indent_first_line: body_indent(),
            line_spacing: LineSpacing::Auto(1.5),
            ..Paragraph::default()
        }],
        BlockKind::Citation => vec![Paragraph {
            runs: vec![style.sized_run(block.content.as_str(), CITATION_FONT_SIZE).italic()],
            space_after: BODY_SPACE_AFTER,
            alignment: Alignment::Justify,
            indent_left: cm(4.0),
            line_spacing: LineSpacing::Auto(1.0),
            ..Paragraph::default()
        }],
        BlockKind::PageBreak => vec![Paragraph {
            page_break_before: true,
            ..Paragraph::default()
        }],
        BlockKind::FreeForm => vec![Paragraph {
            runs: vec![style.run(block.content.as_str())],
            space_after: BODY_SPACE_AFTER,
            alignment: Alignment::Justify,
            line_spacing: LineSpacing::Auto(1.5),
            ..Paragraph::default()
        }],
        BlockKind::References => block
            .content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Paragraph {
                runs: vec![style.run(line.trim_end())],
                space_after: REFERENCE_SPACE_AFTER,
                alignment: Alignment::Justify,
                // First line at the margin, continuation lines indented.
                indent_left: body_indent(),
                indent_hanging: body_indent(),
                line_spacing: LineSpacing::Auto(1.0),
                ..Paragraph::default()
            })
            .collect(),
        BlockKind::Unknown => {
            log::warn!("Skipping block {} of unknown type", block.id);
            Vec::new()
        }
    }
}
