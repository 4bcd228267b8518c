//! CLI frontend for Seelenwanderer interactive narrative sessions.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sw",
    about = "Seelenwanderer — a soul-exploring interactive story",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session on stdin/stdout
    Play {
        /// Chapters before the ending
        #[arg(short, long, default_value = "5")]
        chapters: u32,

        /// Ollama endpoint URL
        #[arg(long, default_value = sw_narrator::DEFAULT_URL)]
        url: String,

        /// Generation model name
        #[arg(short, long, default_value = sw_narrator::DEFAULT_MODEL)]
        model: String,

        /// Narrator request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,

        /// Use the scripted narrator instead of a model service
        #[arg(long)]
        offline: bool,

        /// Append the finished session record to this JSON-lines file
        #[arg(long)]
        archive: Option<PathBuf>,
    },

    /// Check whether the narrator service is reachable
    Check {
        /// Ollama endpoint URL
        #[arg(long, default_value = sw_narrator::DEFAULT_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            chapters,
            url,
            model,
            timeout,
            offline,
            archive,
        } => {
            commands::play::run(chapters, &url, &model, timeout, offline, archive.as_deref()).await
        }
        Commands::Check { url } => commands::check::run(&url).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
