use crate::block::TocEntry;
use crate::model::{Alignment, LineSpacing, Paragraph, TabAlignment, TabStop, cm};

use super::TextStyle;

const CONTENTS_TITLE: &str = "SUMÁRIO";

/// "SUMÁRIO" followed by one dot-leadered line per entry.
pub(super) fn contents_page(toc: &[TocEntry], style: TextStyle, text_width: f32) -> Vec<Paragraph> {
    let mut paragraphs = vec![Paragraph {
        runs: vec![style.run(CONTENTS_TITLE).bold()],
        space_after: 24.0,
        alignment: Alignment::Center,
        ..Paragraph::default()
    }];

    for entry in toc {
        let label = style.run(format!("{} {}", entry.numbering, entry.title.trim()));
        let label = if entry.level.get() == 1 { label.bold() } else { label };
        let mut page = style.run(entry.page.to_string());
        page.tab_before = true;

        paragraphs.push(Paragraph {
            runs: vec![label, page],
            space_after: 6.0,
            indent_left: cm(0.5) * f32::from(entry.level.get() - 1),
            line_spacing: LineSpacing::Auto(1.5),
            tab_stops: vec![TabStop {
                position: text_width,
                alignment: TabAlignment::Right,
                leader: Some('.'),
            }],
            ..Paragraph::default()
        });
    }

    paragraphs
}
