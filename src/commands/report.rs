//! Report command implementation.

use crate::benchmark::BenchmarkTables;
use crate::config::Config;
use crate::format::Formatter;
use crate::rates::ExchangeRateCache;
use crate::report::{Assembler, ProductReport};
use crate::spapi::client::{SpApiClient, SpApiProviders};
use crate::spapi::credentials::CredentialStore;
use crate::spapi::marketplaces::Marketplace;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

/// Builds product reports for one or more ASINs.
pub struct ReportCommand {
    config: Config,
    credentials: CredentialStore,
    rates: ExchangeRateCache,
    benchmarks: BenchmarkTables,
}

impl ReportCommand {
    /// Creates a new report command.
    pub fn new(
        config: Config,
        credentials: CredentialStore,
        rates: ExchangeRateCache,
        benchmarks: BenchmarkTables,
    ) -> Self {
        Self { config, credentials, rates, benchmarks }
    }

    /// Builds reports for the given ASINs and returns formatted output.
    ///
    /// Routing failures (unknown marketplace, unconfigured region) are fatal;
    /// everything downstream degrades per section inside the assembler. In a
    /// batch, invalid ASINs are skipped with a stderr note.
    pub async fn execute(&self, asins: &[String]) -> Result<String> {
        let (marketplace, bundle) = self
            .credentials
            .route(&self.config.marketplace.to_string())
            .context("Cannot route request")?;

        let seller_id = bundle.seller_id.clone();
        let client = SpApiClient::new(
            marketplace,
            bundle.clone(),
            Duration::from_secs(self.config.request_timeout_secs),
        )
        .context("Failed to create SP-API client")?;

        self.execute_with_providers(&client, marketplace, &seller_id, asins).await
    }

    /// Builds reports with provided providers (for testing).
    pub async fn execute_with_providers(
        &self,
        providers: &impl SpApiProviders,
        marketplace: Marketplace,
        seller_id: &str,
        asins: &[String],
    ) -> Result<String> {
        if asins.len() == 1 {
            let Some(asin) = normalize_asin(&asins[0]) else {
                anyhow::bail!(
                    "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
                    asins[0].trim()
                );
            };

            let report = self.assemble_one(providers, marketplace, seller_id, &asin).await;
            let formatter = Formatter::new(self.config.format);
            return Ok(formatter.format_report(&report));
        }

        let mut reports: Vec<ProductReport> = Vec::new();

        for raw in asins {
            let Some(asin) = normalize_asin(raw) else {
                eprintln!("Skipping invalid ASIN: {}", raw.trim());
                continue;
            };

            reports.push(self.assemble_one(providers, marketplace, seller_id, &asin).await);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_reports(&reports))
    }

    async fn assemble_one(
        &self,
        providers: &impl SpApiProviders,
        marketplace: Marketplace,
        seller_id: &str,
        asin: &str,
    ) -> ProductReport {
        info!("Building report: {} on {}", asin, marketplace);

        let assembler = Assembler::new(
            providers,
            providers,
            providers,
            providers,
            &self.rates,
            &self.benchmarks,
        );

        assembler
            .assemble(asin, marketplace, seller_id, self.config.target_currency.as_deref())
            .await
    }
}

/// Trims and uppercases an ASIN; `None` unless it is exactly 10 alphanumeric
/// characters.
fn normalize_asin(raw: &str) -> Option<String> {
    let asin = raw.trim().to_uppercase();
    if asin.len() == 10 && asin.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(asin)
    } else {
        None
    }
}
