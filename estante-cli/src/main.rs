//! Estante CLI - terminal front-end for the digital library

mod commands;
mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estante_core::{ContentFilter, EstanteConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "estante")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read contents from a JSON file instead of the configured provider
    #[arg(long, global = true, env = "ESTANTE_FIXTURE")]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List library contents, newest first
    List {
        /// Filter by kind (todos, ebook, desenho)
        #[arg(short, long, default_value = "todos")]
        filter: ContentFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many ebooks and drawings the library holds
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a content file
    Download {
        /// Content id
        id: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Open the interactive viewer on a content item
    Read {
        /// Content id
        id: String,

        /// Open each page in the system browser as you navigate
        #[arg(long)]
        launch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "estante_cli=debug,estante_core=debug"
    } else {
        "estante_cli=info,estante_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let fixture = cli.fixture.clone();
    let config = EstanteConfig::from_lookup(|key| match (key, &fixture) {
        ("ESTANTE_FIXTURE", Some(path)) => Some(path.display().to_string()),
        _ => std::env::var(key).ok(),
    })
    .context("Invalid configuration (set ESTANTE_PROVIDER_URL and ESTANTE_API_KEY, or --fixture)")?;

    match cli.command {
        Commands::List { filter, json } => commands::list(&config, filter, json).await,

        Commands::Stats { json } => commands::stats(&config, json).await,

        Commands::Download { id, output } => commands::download(&config, &id, &output).await,

        Commands::Read { id, launch } => commands::read(&config, &id, launch).await,
    }
}
