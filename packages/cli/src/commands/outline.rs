use super::resolve;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use docanchor_editor::OutlineItem;
use docanchor_workspace::DocumentService;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutlineFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Document file
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutlineFormat::Text)]
    pub format: OutlineFormat,
}

pub async fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = DocumentService::open(resolve(cwd, &args.path), config.outline_config()).await?;

    let outline = service.build_outline().await?;
    // Markers and the stored outline live in the file
    service.save().await?;

    print_outline(&outline, args.format)
}

pub(crate) fn print_outline(outline: &[OutlineItem], format: OutlineFormat) -> Result<()> {
    match format {
        OutlineFormat::Json => println!("{}", serde_json::to_string_pretty(outline)?),
        OutlineFormat::Text => {
            // Body text sits one step under the heading it follows
            let mut depth = 0;
            for item in outline {
                let anchor = item.paragraph_id.as_str().dimmed();
                if item.level > 0 {
                    depth = item.level as usize;
                    println!("{}{}  {}", "  ".repeat(depth - 1), anchor, item.text.bold());
                } else {
                    println!("{}{}  {}", "  ".repeat(depth), anchor, item.text);
                }
            }
        }
    }
    Ok(())
}
