//! # Docanchor Editor
//!
//! Addresses document blocks through stable anchors and applies batches of
//! structural edits against them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ identity: (text, level, ordinal) → anchor   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ outline: walk paragraphs, place markers,    │
//! │          persist snapshot to settings       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ resolver: anchor → marker → insertion point │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ applier: ordered operations, one session    │
//! │          (unit of work) per operation       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The document itself is reached only through the
//! [`docanchor_host::DocumentHost`] and [`docanchor_host::SettingsStore`]
//! traits. Markers live in the document; the outline is a disposable view.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docanchor_editor::{apply_ops, Operation, OutlineBuilder};
//! use docanchor_host::MemoryDocument;
//!
//! let mut doc = MemoryDocument::from_text("Report", Some("Summary"));
//! let (host, settings) = doc.split_mut();
//!
//! let outline = OutlineBuilder::default().build(host, settings)?;
//!
//! let ops = vec![Operation::AddParagraph {
//!     text: "Details".to_string(),
//!     after_paragraph_id: Some(outline[0].paragraph_id.clone()),
//! }];
//! apply_ops(host, &ops)?;
//! ```

mod applier;
mod errors;
mod identity;
mod operations;
mod outline;
mod resolver;
mod session;

pub use applier::{apply_ops, ApplyReport, OpEffect};
pub use errors::{BatchError, EditorError};
pub use identity::{derive_anchor, level_from_style, normalize_text, AnchorId, IdentityScheme};
pub use operations::{clamp_heading_level, table_spec, Operation, DEFAULT_TABLE_DIMENSION};
pub use outline::{
    load_persisted_outline, persist_outline, OutlineBuilder, OutlineConfig, OutlineItem,
    DEFAULT_MARKER_TITLE_PREFIX, DEFAULT_OUTLINE_KEY,
};
pub use resolver::{find_marker, resolve_insertion_point, InsertionHandle};
pub use session::Session;
