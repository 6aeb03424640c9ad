//! blockport CLI
//!
//! Local execution entry point for the import, style, and audit pipelines.

use std::path::PathBuf;

use blockport::{
    error::Result, models::Config, pipeline, services::WordPressClient, storage::LocalStorage,
};
use clap::{Parser, Subcommand};

/// blockport - WordPress block and GenerateBlocks style extractor
#[derive(Parser, Debug)]
#[command(
    name = "blockport",
    version,
    about = "Extract WordPress posts into typed content blocks and consolidated CSS"
)]
struct Cli {
    /// Path to storage directory containing config.toml and outputs
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch posts, resolve GenerateBlocks elements, and write content blocks
    Import,

    /// Scrape element CSS from pages into one stylesheet
    Styles {
        /// Page paths or absolute URLs (default: the site root)
        pages: Vec<String>,

        /// Merge into the registry from a previous run
        #[arg(long)]
        append: bool,
    },

    /// Report wp-block types the mapper does not handle
    Audit,

    /// Snapshot block types, patterns, and templates
    Inventory,

    /// Validate configuration
    Validate,

    /// Show storage info
    Info,
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

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::with_output(&cli.storage_dir, config.output.clone());

    match cli.command {
        Command::Import => {
            config.validate()?;
            let client = WordPressClient::new(&config)?;
            let summary = pipeline::run_import(&config, &client, &storage).await?;
            log::info!(
                "Import complete: {} posts, {} blocks",
                summary.posts,
                summary.blocks
            );
        }

        Command::Styles { pages, append } => {
            config.validate()?;
            let pages = if pages.is_empty() {
                vec!["/".to_string()]
            } else {
                pages
            };
            let client = WordPressClient::new(&config)?;
            let summary = pipeline::run_styles(&config, &client, &storage, &pages, append).await?;
            if summary.pages_failed > 0 {
                log::warn!("{} pages could not be scraped", summary.pages_failed);
            }
            log::info!(
                "Stylesheet written to {} ({} elements)",
                summary.stylesheet.display(),
                summary.elements
            );
        }

        Command::Audit => {
            config.validate()?;
            let client = WordPressClient::new(&config)?;
            let report = pipeline::run_audit(&config, &client, &storage).await?;
            if report.is_empty() {
                log::info!("Every block type found is mapped");
            }
        }

        Command::Inventory => {
            config.validate()?;
            let client = WordPressClient::new(&config)?;
            let written = pipeline::run_inventory(&client, &storage).await?;
            log::info!("Saved {written} inventory snapshots");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", config.wordpress.base_url);
        }

        Command::Info => {
            log::info!("Storage directory: {}", storage.root().display());
            log::info!("Cached elements: {}", storage.load_elements().await?.len());

            let registry = storage.load_styles().await?;
            log::info!(
                "Style registry: {} elements from {} pages",
                registry.elements.len(),
                registry.page_count
            );
        }
    }

    Ok(())
}
