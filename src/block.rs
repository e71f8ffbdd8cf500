//! Editable document content: metadata, advisors and the ordered block list.
//!
//! Blocks travel over the wire as the flat record the editing surface works
//! with (`{id, type, content, order, level, numbering, isNumbered}`) and are
//! converted into [`Block`], where heading-only data lives in [`Heading`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Fresh random id, unique for the lifetime of the document.
    pub fn generate() -> Self {
        Self(format!("block-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Title,
    Subtitle,
    Paragraph,
    Citation,
    PageBreak,
    FreeForm,
    References,
    /// Any type tag this version does not know. Rendered as nothing.
    #[serde(other)]
    Unknown,
}

impl BlockKind {
    pub fn is_heading(self) -> bool {
        matches!(self, BlockKind::Title | BlockKind::Subtitle)
    }
}

/// Heading depth, 1 through 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot in a per-level counter array.
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| {
            format!("heading level {level} out of range 1..={}", Self::MAX)
        })
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    pub level: HeadingLevel,
    /// False when the author opted this heading out of numbering.
    pub numbered: bool,
    /// Derived by the numbering engine, never edited directly.
    pub numbering: Option<String>,
}

impl Heading {
    pub fn new(level: HeadingLevel) -> Self {
        Self {
            level,
            numbered: true,
            numbering: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
    /// Position in the document. Only relative order matters.
    pub order: u32,
    /// Present only on title/subtitle blocks that declare a level.
    pub heading: Option<Heading>,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, order: u32) -> Self {
        let heading = kind.is_heading().then(|| Heading::new(HeadingLevel::default()));
        Self {
            id: id.into(),
            kind,
            content: String::new(),
            order,
            heading,
        }
    }

    pub fn new_heading(
        id: impl Into<BlockId>,
        kind: BlockKind,
        order: u32,
        level: HeadingLevel,
    ) -> Self {
        Self {
            heading: kind.is_heading().then(|| Heading::new(level)),
            ..Self::new(id, kind, order)
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn level(&self) -> Option<HeadingLevel> {
        self.heading.as_ref().map(|h| h.level)
    }

    pub fn numbering(&self) -> Option<&str> {
        self.heading.as_ref().and_then(|h| h.numbering.as_deref())
    }

    /// Headings are numbered unless explicitly opted out; other blocks report true.
    pub fn is_numbered(&self) -> bool {
        self.heading.as_ref().is_none_or(|h| h.numbered)
    }

    /// Title or subtitle with a declared level.
    pub fn is_leveled_heading(&self) -> bool {
        self.kind.is_heading() && self.heading.is_some()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockKind,
    #[serde(default)]
    content: String,
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    numbering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_numbered: Option<bool>,
}

impl TryFrom<RawBlock> for Block {
    type Error = String;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let heading = match (raw.kind.is_heading(), raw.level) {
            (true, Some(level)) => Some(Heading {
                level: HeadingLevel::try_from(level)
                    .map_err(|e| format!("block {}: {e}", raw.id))?,
                numbered: raw.is_numbered.unwrap_or(true),
                numbering: raw.numbering.filter(|n| !n.is_empty()),
            }),
            _ => None,
        };
        Ok(Block {
            id: raw.id,
            kind: raw.kind,
            content: raw.content,
            order: raw.order,
            heading,
        })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let (level, numbering, is_numbered) = match block.heading {
            Some(h) => (Some(h.level.get()), h.numbering, (!h.numbered).then_some(false)),
            None => (None, None, None),
        };
        RawBlock {
            id: block.id,
            kind: block.kind,
            content: block.content,
            order: block.order,
            level,
            numbering,
            is_numbered,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Advisor {
    pub id: String,
    pub name: String,
    /// Honorific such as "Prof. Dr.".
    #[serde(default)]
    pub title: String,
}

impl Advisor {
    pub fn new(id: impl Into<String>, title: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: title.into(),
        }
    }

    /// "title name", or just the name when no honorific is set.
    pub fn display_name(&self) -> String {
        let title = self.title.trim();
        let name = self.name.trim();
        if title.is_empty() {
            name.to_string()
        } else {
            format!("{title} {name}")
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub institution: String,
    pub course: String,
    pub author: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub city: String,
    pub year: String,
    pub work_nature: String,
    pub work_objective: String,
    pub advisors: Vec<Advisor>,
}

impl DocumentMetadata {
    /// Required text fields that are blank, by display name.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("author", &self.author),
            ("title", &self.title),
            ("institution", &self.institution),
            ("city", &self.city),
            ("year", &self.year),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Metadata plus the block sequence. The blocks are the single source of truth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, alias = "info")]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One line of the table of contents, derived from a numbered heading.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub id: BlockId,
    pub title: String,
    pub numbering: String,
    pub level: HeadingLevel,
    pub page: u32,
}
