//! The document aggregate and the commands that edit it.
//!
//! Every command builds a new block sequence and re-runs the structure
//! synthesis over it, so numbering and the table of contents never drift from
//! the blocks they describe.

use std::collections::HashSet;

use crate::block::{Block, BlockId, BlockKind, Document, DocumentMetadata, Heading, HeadingLevel, TocEntry};
use crate::error::Error;
use crate::hierarchy::{HierarchyWarning, validate_hierarchy};
use crate::pagination::PaginationConfig;
use crate::structure::{DocumentStructure, synthesize_with};

#[derive(Clone, Debug)]
pub struct DocumentEditor {
    metadata: DocumentMetadata,
    next_order: u32,
    pagination: PaginationConfig,
    structure: DocumentStructure,
}

impl Default for DocumentEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentEditor {
    pub fn new() -> Self {
        Self::from_document(Document::default())
    }

    pub fn from_document(document: Document) -> Self {
        let next_order = document
            .blocks
            .iter()
            .map(|b| b.order)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        let pagination = PaginationConfig::default();
        Self {
            metadata: document.metadata,
            next_order,
            structure: synthesize_with(&document.blocks, &pagination),
            pagination,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self.refresh(self.structure.blocks.clone());
        self
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: DocumentMetadata) {
        self.metadata = metadata;
    }

    /// Blocks in document order, headings numbered.
    pub fn blocks(&self) -> &[Block] {
        &self.structure.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.structure.blocks.iter().find(|b| &b.id == id)
    }

    pub fn structure(&self) -> &DocumentStructure {
        &self.structure
    }

    pub fn table_of_contents(&self) -> &[TocEntry] {
        &self.structure.table_of_contents
    }

    pub fn warnings(&self) -> Vec<HierarchyWarning> {
        validate_hierarchy(&self.structure.blocks)
    }

    /// Immutable copy handed to export.
    pub fn snapshot(&self) -> Document {
        Document {
            metadata: self.metadata.clone(),
            blocks: self.structure.blocks.clone(),
        }
    }

    /// Append an empty block. Headings default to level 1.
    pub fn add_block(&mut self, kind: BlockKind, level: Option<HeadingLevel>) -> BlockId {
        let id = BlockId::generate();
        let block = Block::new_heading(id.clone(), kind, self.take_order(), level.unwrap_or_default());
        let mut blocks = self.structure.blocks.clone();
        blocks.push(block);
        self.refresh(blocks);
        id
    }

    pub fn update_content(&mut self, id: &BlockId, content: impl Into<String>) -> Result<(), Error> {
        let content = content.into();
        self.modify(id, |block| {
            block.content = content;
            Ok(())
        })
    }

    pub fn set_level(&mut self, id: &BlockId, level: HeadingLevel) -> Result<(), Error> {
        self.modify(id, |block| {
            if !block.kind.is_heading() {
                return Err(Error::InvalidBlock(format!(
                    "block {} is not a heading and has no level",
                    block.id
                )));
            }
            match block.heading.as_mut() {
                Some(heading) => heading.level = level,
                None => block.heading = Some(Heading::new(level)),
            }
            Ok(())
        })
    }

    /// Opt a heading in or out of numbering.
    pub fn set_numbered(&mut self, id: &BlockId, numbered: bool) -> Result<(), Error> {
        self.modify(id, |block| {
            let Some(heading) = block.heading.as_mut() else {
                return Err(Error::InvalidBlock(format!(
                    "block {} is not a leveled heading",
                    block.id
                )));
            };
            heading.numbered = numbered;
            if !numbered {
                heading.numbering = None;
            }
            Ok(())
        })
    }

    pub fn delete_block(&mut self, id: &BlockId) -> Result<Block, Error> {
        let mut blocks = self.structure.blocks.clone();
        let pos = self.position(id)?;
        let removed = blocks.remove(pos);
        self.refresh(blocks);
        Ok(removed)
    }

    /// Put the blocks in the order of `ids` and renumber `order` as 1..=N.
    ///
    /// `ids` must name every block exactly once.
    pub fn reorder(&mut self, ids: &[BlockId]) -> Result<(), Error> {
        let current = &self.structure.blocks;
        let unique: HashSet<&BlockId> = ids.iter().collect();
        if ids.len() != current.len() || unique.len() != ids.len() {
            return Err(Error::Validation(format!(
                "reorder expects a permutation of {} blocks, got {} ids ({} distinct)",
                current.len(),
                ids.len(),
                unique.len()
            )));
        }

        let mut blocks = Vec::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            let mut block = self.block(id).cloned().ok_or_else(|| Error::UnknownBlock(id.to_string()))?;
            block.order = idx as u32 + 1;
            blocks.push(block);
        }
        self.refresh(blocks);
        Ok(())
    }

    /// Move one block to `index` (clamped to the end) and re-densify `order`.
    pub fn move_block(&mut self, id: &BlockId, index: usize) -> Result<(), Error> {
        let mut ids: Vec<BlockId> = self.structure.blocks.iter().map(|b| b.id.clone()).collect();
        let from = self.position(id)?;
        let moved = ids.remove(from);
        ids.insert(index.min(ids.len()), moved);
        self.reorder(&ids)
    }

    /// Copy a block under a fresh id, appended at the end of the document.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId, Error> {
        let mut copy = self
            .block(id)
            .cloned()
            .ok_or_else(|| Error::UnknownBlock(id.to_string()))?;
        copy.id = BlockId::generate();
        copy.order = self.take_order();
        let new_id = copy.id.clone();
        let mut blocks = self.structure.blocks.clone();
        blocks.push(copy);
        self.refresh(blocks);
        Ok(new_id)
    }

    /// Next free `order`. Once `u32::MAX` is reached new blocks share it and
    /// stay last because sorting is stable.
    fn take_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(1);
        order
    }

    fn position(&self, id: &BlockId) -> Result<usize, Error> {
        self.structure
            .blocks
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| Error::UnknownBlock(id.to_string()))
    }

    fn modify<F>(&mut self, id: &BlockId, edit: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Block) -> Result<(), Error>,
    {
        let pos = self.position(id)?;
        let mut blocks = self.structure.blocks.clone();
        edit(&mut blocks[pos])?;
        self.refresh(blocks);
        Ok(())
    }

    fn refresh(&mut self, blocks: Vec<Block>) {
        self.structure = synthesize_with(&blocks, &self.pagination);
    }
}
