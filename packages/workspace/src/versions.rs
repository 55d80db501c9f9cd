//! Numbered snapshots of saved documents
//!
//! Layout: `<root>/<document stem>/v1.json`, `v2.json`, ...

use crate::error::{WorkspaceError, WorkspaceResult};
use docanchor_host::MemoryDocument;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `contents` as the next version of `document`, returning its name
    pub async fn snapshot(&self, document: &Path, contents: &str) -> WorkspaceResult<String> {
        let dir = self.dir_for(document)?;
        fs::create_dir_all(&dir).await?;

        let next = self.numbers(&dir).await?.last().copied().unwrap_or(0) + 1;
        let name = version_name(next);
        fs::write(dir.join(format!("{}.json", name)), contents).await?;

        info!(document = %document.display(), version = %name, "Version saved");
        Ok(name)
    }

    /// Version names of `document`, oldest first
    pub async fn list(&self, document: &Path) -> WorkspaceResult<Vec<String>> {
        let dir = self.dir_for(document)?;
        if !fs::try_exists(&dir).await? {
            return Ok(Vec::new());
        }
        Ok(self.numbers(&dir).await?.into_iter().map(version_name).collect())
    }

    pub async fn load(&self, document: &Path, version: &str) -> WorkspaceResult<MemoryDocument> {
        let file_name = format!("{}.json", version);
        if parse_version(&file_name).is_none() {
            return Err(WorkspaceError::VersionNotFound(version.to_string()));
        }

        let path = self.dir_for(document)?.join(file_name);
        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WorkspaceError::VersionNotFound(version.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(MemoryDocument::from_json(&source)?)
    }

    fn dir_for(&self, document: &Path) -> WorkspaceResult<PathBuf> {
        let stem = document
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WorkspaceError::InvalidPath(document.to_path_buf()))?;
        Ok(self.root.join(stem))
    }

    async fn numbers(&self, dir: &Path) -> WorkspaceResult<Vec<u32>> {
        let mut numbers = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(n) = entry.file_name().to_str().and_then(parse_version) {
                numbers.push(n);
            }
        }
        numbers.sort_unstable();
        Ok(numbers)
    }
}

fn version_name(n: u32) -> String {
    format!("v{}", n)
}

fn parse_version(file_name: &str) -> Option<u32> {
    file_name
        .strip_suffix(".json")?
        .strip_prefix('v')?
        .parse()
        .ok()
}
