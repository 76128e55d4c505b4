use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xcdl::archive::{AssetDownloader, FieldExtractor, MetadataFetcher};
use xcdl::config::Config;
use xcdl::models::Query;
use xcdl::utils::HttpClient;

/// Download bird sound recordings and metadata from the xeno-canto archive
#[derive(Parser, Debug)]
#[command(name = "xcdl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download bird sound recordings and metadata from the xeno-canto archive", long_about = None)]
struct Cli {
    /// Search terms; the v3 API expects tagged terms like sp:"Apus apus"
    terms: Vec<String>,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Accept invalid TLS certificates (not recommended)
    #[arg(long, default_value_t = false)]
    insecure: bool,
}

fn print_usage() {
    println!("Usage: xcdl searchTerm1 searchTerm2 ... searchTermN");
    println!("Example (species): xcdl 'sp:\"Apus apus\"'");
    println!("Example (genus+species): xcdl gen:Apus sp:apus");
    println!("Example (quality): xcdl 'sp:\"Apus apus\"' q:A");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("xcdl={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // No terms is not an error, it is a request for help.
    if cli.terms.is_empty() {
        print_usage();
        return Ok(());
    }

    let config = Config {
        accept_invalid_certs: cli.insecure,
        ..Config::default()
    };

    // Fail fast on a missing key, before any network activity.
    config.validate()?;

    let query = Query::new(cli.terms);
    let client = Arc::new(HttpClient::from_config(&config)?);

    let fetcher = MetadataFetcher::with_client(config, Arc::clone(&client));
    let summary = fetcher
        .fetch_all(&query)
        .await
        .context("Failed to retrieve JSON data. Halting download.")?;

    let targets = FieldExtractor::new(&summary.path).extract_targets();

    let downloader = AssetDownloader::with_client(client);
    downloader.download_all(&summary.path, &targets).await;

    Ok(())
}
