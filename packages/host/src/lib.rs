//! # Docanchor Host
//!
//! The capability surface a rich-text document host has to provide so the
//! anchor core can address and edit it, plus [`MemoryDocument`], a complete
//! in-memory host used by tests, the CLI and the workspace service.
//!
//! A host exposes two independent things:
//! - [`DocumentHost`]: the body (paragraphs, tables, markers, search)
//! - [`SettingsStore`]: document-level key/value settings storage

pub mod error;
pub mod host;
pub mod memory;
pub mod settings;
pub mod types;

pub use error::*;
pub use host::*;
pub use memory::*;
pub use settings::*;
pub use types::*;
