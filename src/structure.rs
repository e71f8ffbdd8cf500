//! Derives numbering and the table of contents from the raw block sequence.
//!
//! Nothing here is patched incrementally: every edit re-runs [`synthesize`]
//! over the whole document.

use serde::Serialize;

use crate::block::{Block, TocEntry};
use crate::numbering::number_headings;
use crate::pagination::{PaginationConfig, estimate_pages_with};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStructure {
    /// Blocks sorted by `order`, headings carrying their numbering.
    pub blocks: Vec<Block>,
    pub table_of_contents: Vec<TocEntry>,
}

pub fn synthesize(blocks: &[Block]) -> DocumentStructure {
    synthesize_with(blocks, &PaginationConfig::default())
}

pub fn synthesize_with(blocks: &[Block], pagination: &PaginationConfig) -> DocumentStructure {
    let mut sorted = blocks.to_vec();
    // Stable, so equal `order` values keep their input order.
    sorted.sort_by_key(|b| b.order);

    let numbered = number_headings(&sorted);
    let pages = estimate_pages_with(&numbered, pagination);

    let table_of_contents: Vec<TocEntry> = numbered
        .iter()
        .filter(|b| b.is_leveled_heading() && b.is_numbered() && !b.content.trim().is_empty())
        .filter_map(|b| {
            let heading = b.heading.as_ref()?;
            let numbering = heading.numbering.as_deref().filter(|n| !n.is_empty())?;
            Some(TocEntry {
                id: b.id.clone(),
                title: b.content.clone(),
                numbering: numbering.to_string(),
                level: heading.level,
                page: pages.get(&b.id).copied().unwrap_or(1),
            })
        })
        .collect();

    log::debug!(
        "Synthesized structure: {} blocks, {} table of contents entries",
        numbered.len(),
        table_of_contents.len()
    );

    DocumentStructure {
        blocks: numbered,
        table_of_contents,
    }
}
