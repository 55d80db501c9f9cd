use super::resolve;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docanchor_editor::level_from_style;
use docanchor_host::{MemoryDocument, Node};
use docanchor_workspace::DocumentService;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document file
    pub path: PathBuf,

    /// Show a saved version instead of the current file
    #[arg(long)]
    pub version: Option<String>,

    /// List each paragraph's anchor markers
    #[arg(short, long)]
    pub markers: bool,
}

pub async fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = resolve(cwd, &args.path);

    let document = match &args.version {
        Some(version) => config.versions_root(cwd).load(&path, version).await?,
        None => {
            DocumentService::open(&path, config.outline_config())
                .await?
                .snapshot()
                .await
        }
    };

    print_document(&document, args.markers);
    Ok(())
}

fn print_document(document: &MemoryDocument, markers: bool) {
    for node in document.host.nodes() {
        match node {
            Node::Paragraph(paragraph) => {
                match level_from_style(&paragraph.style) {
                    0 => println!("{}", paragraph.text),
                    level => println!(
                        "{} {}",
                        "#".repeat(level as usize).bright_blue(),
                        paragraph.text.bold()
                    ),
                }
                if markers {
                    for marker in &paragraph.markers {
                        println!("    {} {}", "⚓".dimmed(), marker.tag.dimmed());
                    }
                }
            }
            Node::Table(table) => {
                for (row, cells) in table.cells.iter().enumerate() {
                    let line = format!("| {} |", cells.join(" | "));
                    if row == 0 && table.header_row {
                        println!("{}", line.bold());
                    } else {
                        println!("{}", line);
                    }
                }
            }
        }
        println!();
    }
}
