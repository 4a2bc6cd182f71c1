//! Harvester CLI
//!
//! Local execution entry point for crawling and annotating a journal corpus.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use harvester::{error::Result, models::Config, pipeline};

/// Journal article harvester
#[derive(Parser, Debug)]
#[command(
    name = "harvester",
    version,
    about = "Harvests journal articles into a corpus and annotates their morphology"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "scrapper_config.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover articles and write the raw corpus
    Crawl,

    /// Annotate every article in the corpus
    Annotate,

    /// Collect second-person singular verbs from annotated articles
    Scan,

    /// Validate the configuration and any existing corpus
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Crawl => {
            let summary = pipeline::run_crawl(&config).await?;
            if summary.failed > 0 {
                log::warn!("{} articles could not be extracted", summary.failed);
            }
        }
        Command::Annotate => {
            pipeline::run_annotate(&config)?;
        }
        Command::Scan => {
            pipeline::run_scan(&config)?;
        }
        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");
    Ok(())
}
