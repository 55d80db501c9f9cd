//! # Document Service
//!
//! Async access to a single document. Each unit of work (one outline build,
//! one operation) takes the document lock, which tokio hands out in FIFO
//! order. Writers (batches, outline builds, saves) also hold the writer gate
//! for their whole run, so none of them observes a half-applied batch.

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::versions::VersionStore;
use docanchor_editor::{
    load_persisted_outline, ApplyReport, BatchError, Operation, OutlineBuilder, OutlineConfig,
    OutlineItem,
};
use docanchor_host::MemoryDocument;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DocumentService {
    document: Arc<Mutex<MemoryDocument>>,
    writer: Arc<Mutex<()>>,
    path: Option<PathBuf>,
    builder: OutlineBuilder,
    versions: Option<VersionStore>,
}

impl DocumentService {
    /// In-memory document with no backing file
    pub fn new(document: MemoryDocument, config: OutlineConfig) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            writer: Arc::new(Mutex::new(())),
            path: None,
            builder: OutlineBuilder::new(config),
            versions: None,
        }
    }

    /// Load a document saved as JSON
    pub async fn open(path: impl Into<PathBuf>, config: OutlineConfig) -> WorkspaceResult<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path).await?;
        let document = MemoryDocument::from_json(&source)?;
        info!(path = %path.display(), "Document opened");

        Ok(Self {
            path: Some(path),
            ..Self::new(document, config)
        })
    }

    /// Write `document` to `path` and serve it from there
    pub async fn create(
        path: impl Into<PathBuf>,
        document: MemoryDocument,
        config: OutlineConfig,
    ) -> WorkspaceResult<Self> {
        let path = path.into();
        write_document(&path, &document.to_json()?).await?;
        info!(path = %path.display(), "Document created");

        Ok(Self {
            path: Some(path),
            ..Self::new(document, config)
        })
    }

    /// Snapshot every save into `store`
    pub fn with_versions(mut self, store: VersionStore) -> Self {
        self.versions = Some(store);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn versions(&self) -> Option<&VersionStore> {
        self.versions.as_ref()
    }

    /// Build, mark and persist the outline
    pub async fn build_outline(&self) -> WorkspaceResult<Vec<OutlineItem>> {
        let _writer = self.writer.lock().await;
        let mut document = self.document.lock().await;
        let (host, settings) = document.split_mut();
        Ok(self.builder.build(host, settings)?)
    }

    /// Outline stored by the last build, if any
    pub async fn persisted_outline(&self) -> WorkspaceResult<Option<Vec<OutlineItem>>> {
        let document = self.document.lock().await;
        Ok(load_persisted_outline(
            &document.settings,
            &self.builder.config().settings_key,
        )?)
    }

    /// Apply `ops` in order, one locked unit of work per operation
    pub async fn apply_ops(&self, ops: &[Operation]) -> Result<ApplyReport, BatchError> {
        let _writer = self.writer.lock().await;
        info!(operations = ops.len(), "Applying batch");

        let mut report = ApplyReport::default();
        for (index, op) in ops.iter().enumerate() {
            let mut document = self.document.lock().await;
            let effect = op.apply(&mut document.host).map_err(|source| BatchError {
                index,
                kind: op.kind(),
                source,
            })?;
            drop(document);

            debug!(index, operation = op.kind(), "Operation committed");
            report.record(effect);
        }

        info!(applied = report.applied, "Batch applied");
        Ok(report)
    }

    /// Write the document back to its file, returning the new version name
    /// when a version store is attached
    pub async fn save(&self) -> WorkspaceResult<Option<String>> {
        let path = self.path.as_deref().ok_or(WorkspaceError::NotFileBacked)?;
        let _writer = self.writer.lock().await;
        let contents = self.document.lock().await.to_json()?;
        write_document(path, &contents).await?;
        debug!(path = %path.display(), "Document saved");

        match &self.versions {
            Some(store) => Ok(Some(store.snapshot(path, &contents).await?)),
            None => Ok(None),
        }
    }

    /// Copy of the current document state
    pub async fn snapshot(&self) -> MemoryDocument {
        self.document.lock().await.clone()
    }
}

async fn write_document(path: &Path, contents: &str) -> WorkspaceResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;
    Ok(())
}
