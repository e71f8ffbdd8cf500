//! Advisory check for skipped heading levels.

use std::fmt;

use crate::block::{Block, BlockId, HeadingLevel};

#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyWarning {
    pub block_id: BlockId,
    pub content: String,
    pub level: HeadingLevel,
    /// Level of the preceding heading, 0 at the start of the document.
    pub previous_level: u8,
}

impl fmt::Display for HierarchyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Heading \"{}\" (level {}) jumps from level {}. Consider adding intermediate headings.",
            self.content, self.level, self.previous_level
        )
    }
}

/// Flag every heading that is more than one level deeper than the heading
/// before it. Only the first step of a jump is reported: the tracked level
/// moves to the offending heading either way.
pub fn validate_hierarchy(blocks: &[Block]) -> Vec<HierarchyWarning> {
    let mut warnings = Vec::new();
    let mut last_level = 0u8;

    for block in blocks.iter().filter(|b| b.kind.is_heading()) {
        let Some(level) = block.level() else {
            continue;
        };
        if level.get() > last_level + 1 {
            warnings.push(HierarchyWarning {
                block_id: block.id.clone(),
                content: block.content.clone(),
                level,
                previous_level: last_level,
            });
        }
        last_level = level.get();
    }

    warnings
}
