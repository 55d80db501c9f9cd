pub mod apply;
pub mod create;
pub mod init;
pub mod outline;
pub mod show;
pub mod versions;

pub use apply::{apply, ApplyArgs};
pub use create::{create, CreateArgs};
pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use show::{show, ShowArgs};
pub use versions::{versions, VersionsArgs};

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the working directory
pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    PathBuf::from(cwd).join(path)
}
