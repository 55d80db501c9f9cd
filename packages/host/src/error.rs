use crate::BlockId;
use thiserror::Error;

/// Errors raised by a document host or its settings storage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Block {0} is not a paragraph")]
    NotAParagraph(BlockId),

    #[error("Marker not found: {0}")]
    MarkerNotFound(u64),

    #[error("Block {0} is not a table")]
    NotATable(BlockId),

    #[error("Cell ({row}, {col}) is outside table {table}")]
    CellOutOfRange {
        table: BlockId,
        row: usize,
        col: usize,
    },

    #[error("Invalid table shape: {rows}x{cols}")]
    InvalidTableShape { rows: usize, cols: usize },

    #[error("Text range {start}..{end} is stale")]
    StaleRange { start: usize, end: usize },

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Sync rejected: {0}")]
    SyncRejected(String),

    #[error("Settings storage error: {0}")]
    Storage(String),
}
