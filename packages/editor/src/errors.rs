//! Error types for the editor

use crate::AnchorId;
use docanchor_host::HostError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Anchor not found: {0}")]
    AnchorNotFound(AnchorId),

    #[error("Host sync failure: {0}")]
    HostSyncFailure(#[from] HostError),

    #[error("{target} index {index} out of range (len {len})")]
    TargetIndexOutOfRange {
        target: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Outline snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// First failure of a batch
///
/// Operations before `index` were applied and stay applied.
#[derive(Error, Debug)]
#[error("Operation {index} ({kind}) failed: {source}")]
pub struct BatchError {
    pub index: usize,
    pub kind: &'static str,
    #[source]
    pub source: EditorError,
}

impl BatchError {
    /// Number of operations that completed before the failure
    pub fn applied(&self) -> usize {
        self.index
    }
}
