//! tagline CLI - Batch image captioning with vision language models.
//!
//! tagline walks a folder of images, asks a hosted vision model for a
//! descriptive caption per image, and writes the result as a sidecar text
//! file or as the image's new filename.
//!
//! # Usage
//!
//! ```bash
//! # Caption a folder in place, numbered files + .txt sidecars
//! tagline caption ./photos --prefix cat
//!
//! # Caption into a separate folder, captions become filenames
//! tagline caption ./photos ./captioned --mode file-name
//!
//! # View configuration
//! tagline config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// tagline - Batch image captioning with vision language models.
#[derive(Parser, Debug)]
#[command(name = "tagline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Caption every image in a folder
    Caption(cli::caption::CaptionArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up API keys from a local .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match tagline_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `tagline config path`."
            );
            tagline_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("tagline v{}", tagline_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Caption(args) => cli::caption::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
