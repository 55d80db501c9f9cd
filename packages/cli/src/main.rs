mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, create, init, outline, show, versions, ApplyArgs, CreateArgs, InitArgs, OutlineArgs,
    ShowArgs, VersionsArgs,
};
use tracing_subscriber::EnvFilter;

/// Docanchor CLI - anchor-addressed edits for structured documents
#[derive(Parser, Debug)]
#[command(name = "docanchor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file
    Init(InitArgs),

    /// Create a new document
    Create(CreateArgs),

    /// Build, mark and print the document outline
    Outline(OutlineArgs),

    /// Apply a batch of operations from a JSON file
    Apply(ApplyArgs),

    /// List saved versions of a document
    Versions(VersionsArgs),

    /// Print the document body
    Show(ShowArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Create(args) => create(args, &cwd).await,
        Command::Outline(args) => outline(args, &cwd).await,
        Command::Apply(args) => apply(args, &cwd).await,
        Command::Versions(args) => versions(args, &cwd).await,
        Command::Show(args) => show(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
