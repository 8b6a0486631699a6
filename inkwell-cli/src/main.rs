//! # inkwell CLI
//!
//! Command-line interface for the inkwell blog generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkwell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "inkwell.yml", env = "INKWELL_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the output directory
    Build,

    /// Render a single markdown file to HTML on stdout
    Render {
        /// Markdown file, or `-` for stdin
        input: PathBuf,

        /// Leave `> [!TYPE]` block quotes as plain quotes
        #[arg(long)]
        no_callouts: bool,
    },

    /// List blog posts, newest first
    Posts {
        /// Maximum posts to list
        #[arg(long)]
        limit: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List blog tags
    Tags {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build => commands::build_site(&cli.config),
        Commands::Render { input, no_callouts } => commands::render_file(&input, !no_callouts),
        Commands::Posts { limit, json } => commands::list_posts(&cli.config, limit, json),
        Commands::Tags { json } => commands::list_tags(&cli.config, json),
    }
}
