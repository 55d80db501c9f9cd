use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docanchor_editor::IdentityScheme;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Derive anchors from occurrence instead of position
    #[arg(long)]
    pub occurrence: bool,

    /// Do not keep a copy of each save
    #[arg(long)]
    pub no_versions: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        identity_scheme: if args.occurrence {
            IdentityScheme::Occurrence
        } else {
            IdentityScheme::Positional
        },
        keep_versions: !args.no_versions,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: docanchor create report.json --title \"Report\"");
    println!("  2. Run: docanchor outline report.json");
    println!("  3. Run: docanchor apply report.json ops.json");

    Ok(())
}
