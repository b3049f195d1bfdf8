//! Category rank benchmarks.
//!
//! The benchmark provider is an opaque external collaborator returning a
//! category → percentile-threshold table per marketplace. Tables are loaded
//! once at startup; a failed load leaves that marketplace without a table
//! and the report simply omits the section.

use crate::spapi::marketplaces::Marketplace;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Category name → percentile label (e.g. "Top 1% BSR") → rank threshold.
pub type BenchmarkTable = BTreeMap<String, BTreeMap<String, u64>>;

/// Rank-benchmark provider - enables mocking for tests.
#[async_trait]
pub trait BenchmarkProvider: Send + Sync {
    /// Fetches the benchmark table for one marketplace.
    async fn table(&self, marketplace: Marketplace) -> Result<BenchmarkTable>;
}

/// HTTP benchmark provider fetching pre-digested JSON tables.
pub struct HttpBenchmarkProvider {
    client: Client,
    base_url: String,
}

impl HttpBenchmarkProvider {
    /// Creates a provider against the given table endpoint.
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl BenchmarkProvider for HttpBenchmarkProvider {
    async fn table(&self, marketplace: Marketplace) -> Result<BenchmarkTable> {
        let url = format!("{}/bsr-tables?country={}", self.base_url, marketplace);

        debug!("GET {}", url);
        let response =
            self.client.get(&url).send().await.context("Failed to send benchmark request")?;

        if !response.status().is_success() {
            anyhow::bail!("Benchmark provider returned status: {}", response.status());
        }

        let text = response.text().await.context("Failed to read benchmark response")?;
        serde_json::from_str(&text).context("Failed to parse benchmark table")
    }
}

/// Startup-loaded benchmark tables, one per configured marketplace.
#[derive(Debug, Default)]
pub struct BenchmarkTables {
    tables: HashMap<Marketplace, BenchmarkTable>,
}

impl BenchmarkTables {
    /// Creates an empty table set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads tables for the given marketplaces, tolerating per-marketplace
    /// failures.
    pub async fn load(provider: &dyn BenchmarkProvider, marketplaces: &[Marketplace]) -> Self {
        let mut tables = HashMap::new();

        for &mp in marketplaces {
            match provider.table(mp).await {
                Ok(table) => {
                    info!("Loaded benchmark table for {} ({} categories)", mp, table.len());
                    tables.insert(mp, table);
                }
                Err(e) => warn!("Could not load benchmark table for {}: {}", mp, e),
            }
        }

        Self { tables }
    }

    /// Returns the table for a marketplace, if loaded.
    pub fn get(&self, marketplace: Marketplace) -> Option<&BenchmarkTable> {
        self.tables.get(&marketplace)
    }
}
