use super::outline::{print_outline, OutlineFormat};
use super::resolve;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use docanchor_editor::{ApplyReport, BatchError, Operation, OutlineItem};
use docanchor_workspace::DocumentService;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document file
    pub path: PathBuf,

    /// JSON file holding the operations
    pub ops: PathBuf,

    /// Format of the outline printed afterwards
    #[arg(short, long, value_enum, default_value_t = OutlineFormat::Text)]
    pub format: OutlineFormat,
}

/// Either a bare array or `{"operations": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpsFile {
    Bare(Vec<Operation>),
    Wrapped { operations: Vec<Operation> },
}

impl OpsFile {
    fn into_operations(self) -> Vec<Operation> {
        match self {
            OpsFile::Bare(ops) | OpsFile::Wrapped { operations: ops } => ops,
        }
    }
}

fn parse_operations(source: &str) -> Result<Vec<Operation>> {
    let file: OpsFile = serde_json::from_str(source).context("Invalid operations file")?;
    Ok(file.into_operations())
}

/// Outcome of one `apply` run; the document is saved whether or not the
/// batch finished
pub(crate) struct BatchOutcome {
    pub outline: Vec<OutlineItem>,
    pub version: Option<String>,
    pub result: Result<ApplyReport, BatchError>,
}

pub(crate) async fn apply_and_save(
    service: &DocumentService,
    ops: &[Operation],
) -> Result<BatchOutcome> {
    let result = service.apply_ops(ops).await;
    if let Err(err) = &result {
        warn!(index = err.index, operation = err.kind, error = %err.source, "Batch stopped early");
    }

    // Whatever was applied is the new document state
    let outline = service.build_outline().await?;
    let version = service.save().await?;

    Ok(BatchOutcome {
        outline,
        version,
        result,
    })
}

pub async fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let ops_path = resolve(cwd, &args.ops);
    let source = tokio::fs::read_to_string(&ops_path)
        .await
        .with_context(|| format!("Cannot read {}", ops_path.display()))?;
    let ops = parse_operations(&source)?;
    info!(operations = ops.len(), file = %ops_path.display(), "Operations loaded");

    let mut service = DocumentService::open(resolve(cwd, &args.path), config.outline_config()).await?;
    if let Some(store) = config.version_store(cwd) {
        service = service.with_versions(store);
    }

    let outcome = apply_and_save(&service, &ops).await?;

    match &outcome.result {
        Ok(report) => println!(
            "  {} Applied {} operations ({} replacements, {} removed)",
            "✓".green(),
            report.applied,
            report.replacements,
            report.removed
        ),
        Err(err) => println!(
            "  {} Applied {} of {} operations; {} failed",
            "✗".red(),
            err.applied(),
            ops.len(),
            err.kind
        ),
    }
    if let Some(version) = &outcome.version {
        println!("  {} Saved {}", "✓".green(), version);
    }
    println!();

    print_outline(&outcome.outline, args.format)?;
    outcome.result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docanchor_editor::{AnchorId, EditorError, OutlineConfig};
    use docanchor_host::MemoryDocument;
    use docanchor_workspace::VersionStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_batch_is_saved_and_outlined() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.json");
        let service = DocumentService::create(
            &path,
            MemoryDocument::from_text("Notes", Some("first")),
            OutlineConfig::default(),
        )
        .await
        .unwrap()
        .with_versions(VersionStore::new(temp.path().join("versions")));

        let ops = vec![
            Operation::AddParagraph {
                text: "second".into(),
                after_paragraph_id: None,
            },
            Operation::AddParagraph {
                text: "never".into(),
                after_paragraph_id: Some(AnchorId::from("p-00000000")),
            },
        ];
        let outcome = apply_and_save(&service, &ops).await.unwrap();

        let err = outcome.result.unwrap_err();
        assert_eq!(err.applied(), 1);
        assert!(matches!(err.source, EditorError::AnchorNotFound(_)));

        let texts: Vec<&str> = outcome.outline.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Notes", "first", "second"]);
        assert_eq!(outcome.version.as_deref(), Some("v1"));

        let saved = DocumentService::open(&path, OutlineConfig::default()).await.unwrap();
        assert_eq!(saved.persisted_outline().await.unwrap(), Some(outcome.outline));
    }

    #[tokio::test]
    async fn test_apply_command_reports_failure_after_saving() {
        let temp = TempDir::new().unwrap();
        let cwd = temp.path().to_str().unwrap();
        DocumentService::create(
            temp.path().join("doc.json"),
            MemoryDocument::from_text("Doc", None),
            OutlineConfig::default(),
        )
        .await
        .unwrap();
        std::fs::write(
            temp.path().join("ops.json"),
            r#"[{"type": "add_paragraph", "text": "kept"}, {"type": "remove_table", "table_index": 3}]"#,
        )
        .unwrap();

        let args = ApplyArgs {
            path: "doc.json".into(),
            ops: "ops.json".into(),
            format: OutlineFormat::Json,
        };
        assert!(apply(args, cwd).await.is_err());

        let saved = DocumentService::open(temp.path().join("doc.json"), OutlineConfig::default())
            .await
            .unwrap();
        assert_eq!(saved.snapshot().await.host.paragraph_texts(), vec!["Doc", "kept"]);
        assert!(temp.path().join(".docanchor/versions/doc/v1.json").exists());
    }

    #[test]
    fn test_parse_bare_array() {
        let ops = parse_operations(
            r#"[{"type": "add_paragraph", "text": "Hi"}, {"type": "remove_table", "table_index": 0}]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1], Operation::RemoveTable { table_index: 0 });
    }

    #[test]
    fn test_parse_wrapped() {
        let ops = parse_operations(
            r#"{"operations": [{"type": "replace_text", "find": "a", "replace": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(ops[0].kind(), "replace_text");
    }

    #[test]
    fn test_parse_rejects_unknown_operation() {
        assert!(parse_operations(r#"[{"type": "bold_text", "text": "x"}]"#).is_err());
    }
}
