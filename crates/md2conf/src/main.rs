//! md2conf CLI - Markdown to Confluence storage format.
//!
//! Provides commands for:
//! - `render`: Convert a Markdown document to storage format
//! - `languages`: List code block language aliases

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LanguagesArgs, RenderArgs};
use output::Output;

/// md2conf - Markdown to Confluence storage format.
#[derive(Parser)]
#[command(name = "md2conf", version, about)]
struct Cli {
    /// Enable info-level logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to Confluence storage format.
    Render(RenderArgs),
    /// List code block language aliases.
    Languages(LanguagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Languages(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
