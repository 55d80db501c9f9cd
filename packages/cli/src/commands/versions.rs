use super::resolve;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Document file
    pub path: PathBuf,
}

pub async fn versions(args: VersionsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.versions_root(cwd);
    let names = store.list(&resolve(cwd, &args.path)).await?;

    if names.is_empty() {
        println!("{}", "No saved versions".yellow());
        return Ok(());
    }

    for name in &names {
        println!("  {}", name);
    }
    println!();
    println!("{} versions in {}", names.len(), store.root().display());
    Ok(())
}
