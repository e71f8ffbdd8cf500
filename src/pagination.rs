//! Coarse page estimation for the table of contents.
//!
//! This is a character-budget heuristic, not a layout engine: each block is
//! given a weight roughly proportional to the space it takes and a new page
//! starts whenever the running total would exceed the budget. The only
//! guarantees are determinism and page numbers that never decrease along the
//! block sequence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId, BlockKind};

/// Fixed weight of a heading, regardless of its text.
const HEADING_WEIGHT: f64 = 200.0;
/// Citations are set in a smaller font.
const CITATION_FACTOR: f64 = 0.8;
/// References are single-spaced.
const REFERENCES_FACTOR: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Page number of the first body block.
    pub first_page: u32,
    /// Character units that fit on one page.
    pub page_budget: f64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        // Pages 1 and 2 hold the cover and the title page.
        Self {
            first_page: 3,
            page_budget: 2500.0,
        }
    }
}

impl PaginationConfig {
    pub fn for_layout(with_title_page: bool) -> Self {
        Self {
            first_page: if with_title_page { 3 } else { 2 },
            ..Self::default()
        }
    }
}

/// Space a block is assumed to take, in character units.
pub fn block_weight(block: &Block) -> f64 {
    let chars = block.content.chars().count() as f64;
    match block.kind {
        BlockKind::Title | BlockKind::Subtitle => HEADING_WEIGHT,
        BlockKind::Paragraph | BlockKind::FreeForm => chars,
        BlockKind::Citation => chars * CITATION_FACTOR,
        BlockKind::References => chars * REFERENCES_FACTOR,
        BlockKind::PageBreak | BlockKind::Unknown => 0.0,
    }
}

/// Estimated 1-based page of every block, with the default configuration.
pub fn estimate_pages(blocks: &[Block]) -> HashMap<BlockId, u32> {
    estimate_pages_with(blocks, &PaginationConfig::default())
}

/// Estimated 1-based page of every block. `blocks` must be sorted by `order`.
pub fn estimate_pages_with(blocks: &[Block], config: &PaginationConfig) -> HashMap<BlockId, u32> {
    let mut pages = HashMap::with_capacity(blocks.len());
    let mut page = config.first_page;
    let mut used = 0.0_f64;

    for block in blocks {
        if block.kind == BlockKind::PageBreak {
            page += 1;
            used = 0.0;
            pages.insert(block.id.clone(), page);
            continue;
        }

        let weight = block_weight(block);
        if used + weight > config.page_budget && used > 0.0 {
            page += 1;
            used = weight;
        } else {
            used += weight;
        }
        pages.insert(block.id.clone(), page);
    }

    pages
}
