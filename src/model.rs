//! Formatted output: sections of paragraph/run descriptors handed to an encoder.
//!
//! All lengths are in points.

use serde::{Deserialize, Serialize};

/// Centimetres to points.
pub fn cm(value: f32) -> f32 {
    value * 72.0 / 2.54
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabAlignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabStop {
    pub position: f32,
    pub alignment: TabAlignment,
    pub leader: Option<char>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineSpacing {
    Auto(f32), // multiplier (1.0 = single, 1.5 = one and a half)
    Exact(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionBreakType {
    NextPage,
    Continuous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Cover,
    TitlePage,
    Contents,
    Body,
}

/// Page size and margins, shared by every section of the document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSetup {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub header_margin: f32,
    pub footer_margin: f32,
}

impl Default for PageSetup {
    /// A4 with the ABNT margins: 3cm top and left, 2cm bottom and right.
    fn default() -> Self {
        Self {
            page_width: cm(21.0),
            page_height: cm(29.7),
            margin_top: cm(3.0),
            margin_bottom: cm(2.0),
            margin_left: cm(3.0),
            margin_right: cm(2.0),
            header_margin: cm(2.0),
            footer_margin: cm(1.25),
        }
    }
}

impl PageSetup {
    pub fn text_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldCode {
    Page,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub text: String,
    pub font_size: f32,
    pub font_name: String,
    pub bold: bool,
    pub italic: bool,
    pub field_code: Option<FieldCode>,
    /// Emit a tab character before the text.
    pub tab_before: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, font_name: &str, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.to_string(),
            bold: false,
            italic: false,
            field_code: None,
            tab_before: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub space_before: f32,
    pub space_after: f32,
    pub alignment: Alignment,
    pub indent_left: f32,
    pub indent_hanging: f32,
    pub indent_first_line: f32,
    pub line_spacing: LineSpacing,
    /// Outline level 1-5 for headings, mapped to the HeadingN styles.
    pub heading_level: Option<u8>,
    pub keep_next: bool,
    pub page_break_before: bool,
    pub tab_stops: Vec<TabStop>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            runs: Vec::new(),
            space_before: 0.0,
            space_after: 0.0,
            alignment: Alignment::Left,
            indent_left: 0.0,
            indent_hanging: 0.0,
            indent_first_line: 0.0,
            line_spacing: LineSpacing::Auto(1.0),
            heading_level: None,
            keep_next: false,
            page_break_before: false,
            tab_stops: Vec::new(),
        }
    }
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderFooter {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    /// How this section starts relative to the previous one.
    pub break_type: SectionBreakType,
    pub paragraphs: Vec<Paragraph>,
    pub header: Option<HeaderFooter>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormattedDocument {
    pub page: PageSetup,
    pub sections: Vec<Section>,
    /// Document default font, written to the style sheet.
    pub font_name: String,
    pub font_size: f32,
    /// Package properties.
    pub title: String,
    pub author: String,
}

impl FormattedDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}
