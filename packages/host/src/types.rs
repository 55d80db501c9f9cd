use serde::{Deserialize, Serialize};
use std::fmt;

/// Style name of body text
pub const NORMAL_STYLE: &str = "Normal";

/// Style name for a heading of the given depth ("Heading 1".."Heading 6")
pub fn heading_style(level: u8) -> String {
    format!("Heading {}", level)
}

/// Host-assigned handle for a body node (paragraph or table)
///
/// Handles are never reused within one document, so a stale handle fails
/// with [`crate::HostError::BlockNotFound`] instead of hitting another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where new content goes relative to an existing block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Before,
    After,
    /// Swap the existing block for the new one
    Replace,
}

/// Paragraph as seen at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub text: String,
    pub style: String,
}

/// Table as seen at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub id: BlockId,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<String>>,
    pub header_row: bool,
}

/// Shape and initial content of a table to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub rows: usize,
    pub cols: usize,
    /// Cell text by row; missing or surplus cells are ignored
    pub data: Vec<Vec<String>>,
    pub header_row: bool,
}

/// Invisible tag wrapping a paragraph, carrying a payload (`tag`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: u64,
    pub tag: String,
    /// Human-readable label, diagnostics only
    pub title: String,
    pub block: BlockId,
}

/// Container of a search hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLocation {
    Paragraph(BlockId),
    Cell { table: BlockId, row: usize, col: usize },
}

/// Byte range of matched text inside one paragraph or cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub location: TextLocation,
    pub start: usize,
    pub end: usize,
}
