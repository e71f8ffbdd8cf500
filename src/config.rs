use serde::{Deserialize, Serialize};

use crate::model::PageSetup;
use crate::pagination::PaginationConfig;

/// Export settings. The defaults produce the full ABNT layout: cover, title
/// page with advisors, body pages numbered in the header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Emit the title page ("folha de rosto"). Requires at least one advisor.
    pub with_title_page: bool,
    /// Emit a "SUMÁRIO" page before the body.
    pub include_table_of_contents: bool,
    /// Page number field in the body header.
    pub page_numbers: bool,
    pub font_name: String,
    /// Points.
    pub body_font_size: f32,
    pub page: PageSetup,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            with_title_page: true,
            include_table_of_contents: false,
            page_numbers: true,
            font_name: "Arial".to_string(),
            body_font_size: 12.0,
            page: PageSetup::default(),
        }
    }
}

impl ExportOptions {
    /// Pagination that matches the front matter these options produce.
    pub fn pagination(&self) -> PaginationConfig {
        let mut config = PaginationConfig::for_layout(self.with_title_page);
        if self.include_table_of_contents {
            config.first_page += 1;
        }
        config
    }
}
