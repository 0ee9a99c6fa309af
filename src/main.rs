//! Inkflow main entry point
//!
//! Command-line interface for the inkflow document loading pipeline.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use inkflow::config::load_config_with_hash;
use inkflow::document::save_records;
use inkflow::Loader;

/// Inkflow: a document loading and ranking pipeline
///
/// Inkflow discovers and crawls web pages, ingests local files, ranks
/// pages by link-graph centrality, and splits everything into
/// token-bounded chunks persisted as a JSON record store.
#[derive(Parser, Debug)]
#[command(name = "inkflow")]
#[command(version = "1.0.0")]
#[command(about = "A document loading and ranking pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discover pages under this URL, crawl and rank them, then chunk
    #[arg(long, value_name = "URL", conflicts_with_all = ["url", "file"])]
    seed_url: Option<String>,

    /// Crawl these exact URLs (repeatable), skipping discovery and ranking
    #[arg(long, value_name = "URL")]
    url: Vec<String>,

    /// Ingest these local files (repeatable)
    #[arg(long, value_name = "PATH")]
    file: Vec<PathBuf>,

    /// Override the configured page-discovery ceiling
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Run the pipeline without writing the record store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if config.ocr.is_enabled() {
        tracing::warn!(
            "OCR credential configured but no OCR backend is installed; scanned formats stay unsupported"
        );
    }

    if cli.seed_url.is_none() && cli.url.is_empty() && cli.file.is_empty() {
        return Err("nothing to load: pass --seed-url, --url, or --file".into());
    }

    let loader = Loader::new(&config)?;
    let mut records = Vec::new();

    if let Some(seed) = &cli.seed_url {
        let max_pages = cli.max_pages.unwrap_or(config.frontier.max_pages);
        records.extend(handle_seed(&loader, seed, max_pages).await?);
    }
    if !cli.url.is_empty() {
        records.extend(handle_urls(&loader, &cli.url).await?);
    }
    if !cli.file.is_empty() {
        records.extend(loader.from_files(&cli.file).await);
    }

    let outcome = loader.chunk(&records);
    report(&records, outcome.records.len());

    if cli.dry_run {
        tracing::info!("Dry run: record store not written");
        return Ok(());
    }

    save_records(&config.output.store_path, &outcome.records)?;
    println!("Wrote {} records to {}", outcome.records.len(), config.output.store_path);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("inkflow=info,warn"),
            1 => EnvFilter::new("inkflow=debug,info"),
            2 => EnvFilter::new("inkflow=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --seed-url: discover, crawl, and keep the top-ranked pages
async fn handle_seed(
    loader: &Loader,
    seed: &str,
    max_pages: usize,
) -> inkflow::Result<Vec<inkflow::DocumentRecord>> {
    let urls = loader.discover(seed, max_pages).await?;
    println!("Discovered {} pages under {}", urls.len(), seed);

    let crawled = loader.from_urls(&urls).await?;
    let ranked = loader.select_candidates(&crawled);
    println!("Kept {} of {} crawled pages after ranking", ranked.len(), crawled.len());
    Ok(ranked)
}

/// Handles --url: crawl the exact list, keeping failures as error records
async fn handle_urls(
    loader: &Loader,
    urls: &[String],
) -> inkflow::Result<Vec<inkflow::DocumentRecord>> {
    loader.from_urls(urls).await
}

/// Prints a one-line batch summary
fn report(records: &[inkflow::DocumentRecord], chunks: usize) {
    let failures = records.iter().filter(|r| r.is_error).count();
    println!(
        "Loaded {} documents ({} failed), {} chunks",
        records.len(),
        failures,
        chunks
    );
}
