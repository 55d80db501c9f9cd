use super::resolve;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use docanchor_host::MemoryDocument;
use docanchor_workspace::DocumentService;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Document file to create
    pub path: PathBuf,

    /// Title, added as a level 1 heading
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Body text; each line becomes a paragraph
    #[arg(short, long)]
    pub body: Option<String>,

    /// Overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

pub async fn create(args: CreateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = resolve(cwd, &args.path);

    if path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let document = MemoryDocument::from_text(&args.title, args.body.as_deref());
    let service = create_outlined(&path, document, &config, cwd).await?;
    let blocks = service.snapshot().await.host.nodes().len();

    println!(
        "  {} Created {} ({} blocks)",
        "✓".green(),
        args.path.display(),
        blocks
    );
    Ok(())
}

/// Write a new document with its first outline and markers in place
pub(crate) async fn create_outlined(
    path: &Path,
    document: MemoryDocument,
    config: &Config,
    cwd: &str,
) -> Result<DocumentService> {
    let mut service = DocumentService::create(path, document, config.outline_config()).await?;
    if let Some(store) = config.version_store(cwd) {
        service = service.with_versions(store);
    }

    let outline = service.build_outline().await?;
    let version = service.save().await?;
    info!(path = %path.display(), blocks = outline.len(), version = ?version, "Document outlined");

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docanchor_editor::{load_persisted_outline, DEFAULT_OUTLINE_KEY};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_document_is_outlined_and_versioned() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path().to_str().unwrap();
        let path = temp.path().join("plan.json");

        let document = MemoryDocument::from_text("Plan", Some("Step one\nStep two"));
        create_outlined(&path, document, &Config::default(), cwd)
            .await
            .unwrap();

        let saved = MemoryDocument::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let outline = load_persisted_outline(&saved.settings, DEFAULT_OUTLINE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(outline.len(), 3);
        assert_eq!(saved.host.marker_count(), 3);
        assert!(temp.path().join(".docanchor/versions/plan/v1.json").exists());
    }
}
