//! # Docanchor Workspace
//!
//! File-backed documents served to async callers. [`DocumentService`] owns
//! one document and serializes outline builds and operation batches on it;
//! [`VersionStore`] keeps a numbered copy of every save.

pub mod error;
pub mod service;
pub mod versions;

pub use error::{WorkspaceError, WorkspaceResult};
pub use service::DocumentService;
pub use versions::VersionStore;
