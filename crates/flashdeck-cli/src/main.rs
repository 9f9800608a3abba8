//! flashdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "flashdeck", version, about = "Flashcard vocabulary trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that opens a study session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Catalog file or http(s) URL (overrides config)
    #[arg(long)]
    catalog: Option<String>,

    /// Store file for progress and group selection (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Shuffle seed for a reproducible card order
    #[arg(long)]
    seed: Option<u64>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Output formats for `flashdeck stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Study cards interactively, reading commands from stdin
    Study {
        #[command(flatten)]
        session: SessionArgs,

        /// Start with the unknown-only filter enabled
        #[arg(long)]
        unknown_only: bool,
    },

    /// Show progress counts for the current selection
    Stats {
        #[command(flatten)]
        session: SessionArgs,

        /// Count only cards that are not known
        #[arg(long)]
        unknown_only: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: StatsFormat,
    },

    /// List groups and toggle their selection
    Groups {
        #[command(flatten)]
        session: SessionArgs,

        /// Group to toggle (repeatable)
        #[arg(long)]
        toggle: Vec<String>,
    },

    /// Check a catalog file for problems
    Validate {
        /// Path to the catalog file
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Create a starter config and sample catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Study {
            session,
            unknown_only,
        } => commands::study::execute(session, unknown_only).await,
        Commands::Stats {
            session,
            unknown_only,
            format,
        } => commands::stats::execute(session, unknown_only, format).await,
        Commands::Groups { session, toggle } => commands::groups::execute(session, toggle).await,
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
