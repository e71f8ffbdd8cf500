//! Hierarchical section numbering ("1", "2.1", "2.1.3").

use crate::block::{Block, HeadingLevel};

const LEVELS: usize = HeadingLevel::MAX as usize;

/// Sibling counts per heading level since the last reset.
///
/// Slots deeper than the most recently advanced level are always zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberingCounters {
    counters: [u32; LEVELS],
}

impl NumberingCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more heading at `level` and return its dotted number.
    pub fn advance(&mut self, level: HeadingLevel) -> String {
        let idx = level.index();
        self.counters[idx] += 1;
        for slot in &mut self.counters[idx + 1..] {
            *slot = 0;
        }
        self.label(level)
    }

    /// Nonzero counters at or above `level`, joined with ".". Missing
    /// ancestors are skipped rather than rendered as zero.
    pub fn label(&self, level: HeadingLevel) -> String {
        self.counters[..=level.index()]
            .iter()
            .filter(|&&c| c > 0)
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counters
    }
}

/// Assign `numbering` to every leveled, numbered heading in `blocks` and
/// clear it on headings opted out of numbering.
///
/// Blocks are taken in slice order, which callers must already have sorted
/// by `order`. Everything else is passed through untouched.
pub fn number_headings(blocks: &[Block]) -> Vec<Block> {
    let mut counters = NumberingCounters::new();
    blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            if !block.kind.is_heading() {
                return block;
            }
            if let Some(heading) = block.heading.as_mut() {
                heading.numbering = heading.numbered.then(|| counters.advance(heading.level));
            }
            block
        })
        .collect()
}
