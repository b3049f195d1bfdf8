//! amz-intel - Product intelligence CLI for the Selling Partner API
//!
//! Builds sellability and profitability reports for ASINs across the
//! supported marketplaces.

use amz_intel::benchmark::{BenchmarkTables, HttpBenchmarkProvider};
use amz_intel::commands::ReportCommand;
use amz_intel::config::{Config, OutputFormat};
use amz_intel::rates::{ExchangeRateCache, HttpRateProvider};
use amz_intel::spapi::credentials::CredentialStore;
use amz_intel::spapi::marketplaces::Marketplace;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-intel",
    version,
    about = "Product intelligence reports from the Selling Partner API",
    long_about = "Given an ASIN and a marketplace, reports whether the product is sellable, what it costs, and whether it is profitable."
)]
struct Cli {
    /// Marketplace to report against
    #[arg(short, long, global = true, env = "AMZ_MARKETPLACE")]
    marketplace: Option<Marketplace>,

    /// Currency to convert monetary figures into
    #[arg(long, global = true, env = "AMZ_CURRENCY")]
    currency: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build product reports by ASIN
    #[command(alias = "r")]
    Report {
        /// ASIN(s) to report on
        #[arg(required = true)]
        asins: Vec<String>,
    },

    /// List supported marketplaces
    Marketplaces,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    if let Some(marketplace) = cli.marketplace {
        config.marketplace = marketplace;
    }
    if let Some(currency) = cli.currency {
        config.target_currency = Some(currency.to_uppercase());
    }

    match cli.command {
        Commands::Report { asins } => {
            let credentials = CredentialStore::from_env();

            let rate_provider = match &config.rate_api_url {
                Some(url) => HttpRateProvider::with_base_url(url.clone())?,
                None => HttpRateProvider::new()?,
            };
            let rates = ExchangeRateCache::new(
                Arc::new(rate_provider),
                Duration::from_secs(config.rate_ttl_secs),
            );

            let benchmarks = match &config.benchmark_url {
                Some(url) => {
                    let provider = HttpBenchmarkProvider::new(url.clone())?;
                    BenchmarkTables::load(&provider, &config.benchmark_marketplaces).await
                }
                None => {
                    warn!("No benchmark service configured, reports carry no rank benchmarks");
                    BenchmarkTables::empty()
                }
            };

            let cmd = ReportCommand::new(config, credentials, rates, benchmarks);
            let output = cmd.execute(&asins).await?;
            println!("{}", output);
        }

        Commands::Marketplaces => {
            println!("Supported marketplaces:\n");
            println!("{:<6} {:<8} {:<16} {:<10}", "Code", "Region", "Marketplace ID", "Currency");
            println!("{:-<6} {:-<8} {:-<16} {:-<10}", "", "", "", "");

            for marketplace in Marketplace::all() {
                println!(
                    "{:<6} {:<8} {:<16} {:<10}",
                    marketplace.to_string(),
                    marketplace.region().to_string(),
                    marketplace.marketplace_id(),
                    marketplace.currency()
                );
            }
        }
    }

    Ok(())
}
