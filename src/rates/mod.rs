//! Exchange-rate caching and currency conversion.
//!
//! One rate table is cached per base currency and refreshed when its TTL
//! lapses. A failed refresh is never surfaced as an error: callers get `None`
//! and conversion degrades to leaving amounts unconverted.

use crate::spapi::models::RatesPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wreq::Client;

const DEFAULT_RATE_API: &str = "https://api.frankfurter.dev/v1";

/// Default table TTL. Rates move slowly enough that a few hours of staleness
/// is acceptable for profit estimates.
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// External exchange-rate provider - enables mocking for tests.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the full currency table for a base currency as of now.
    async fn latest(&self, base: &str) -> Result<RatesPayload>;
}

/// HTTP rate provider speaking the frankfurter-style `/latest?base=` API.
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
}

impl HttpRateProvider {
    /// Creates a provider against the default rate API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_RATE_API.to_string())
    }

    /// Creates a provider with a custom base URL (for testing).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn latest(&self, base: &str) -> Result<RatesPayload> {
        let url = format!("{}/latest?base={}", self.base_url, urlencoding::encode(base));

        debug!("GET {}", url);
        let response =
            self.client.get(&url).send().await.context("Failed to send rates request")?;

        if !response.status().is_success() {
            anyhow::bail!("Rate provider returned status: {}", response.status());
        }

        let text = response.text().await.context("Failed to read rates response")?;
        serde_json::from_str(&text).context("Failed to parse rates response")
    }
}

/// A usable rate table: base currency plus currency → rate mapping.
#[derive(Debug, Clone)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
    fetched_at: Instant,
}

impl RateTable {
    fn from_payload(payload: RatesPayload) -> Self {
        Self { base: payload.base, rates: payload.rates, fetched_at: Instant::now() }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }

    /// Converts an amount between two currencies via this table.
    ///
    /// Identity when source equals target; single multiply/divide when either
    /// side is the table's own base; otherwise divide out the source rate and
    /// apply the target rate. `None` when a needed rate is missing.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(amount);
        }
        if from == self.base {
            return Some(amount * self.rates.get(to)?);
        }
        if to == self.base {
            return Some(amount / self.rates.get(from)?);
        }
        Some(amount / self.rates.get(from)? * self.rates.get(to)?)
    }
}

/// Time-bounded cache of rate tables, keyed by base currency.
pub struct ExchangeRateCache {
    provider: Arc<dyn RateProvider>,
    ttl: Duration,
    tables: Mutex<HashMap<String, Arc<RateTable>>>,
}

impl ExchangeRateCache {
    /// Creates a cache over the given provider with the given TTL.
    pub fn new(provider: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        Self { provider, ttl, tables: Mutex::new(HashMap::new()) }
    }

    /// Returns a fresh table for the base currency, refreshing if the cached
    /// entry is missing or expired. `None` means rates are unavailable right
    /// now; an expired entry is kept in place but never served.
    ///
    /// The refresh runs under the cache lock, so concurrent requests for the
    /// same expired base do not hit the provider redundantly.
    pub async fn table_for(&self, base: &str) -> Option<Arc<RateTable>> {
        let mut tables = self.tables.lock().await;

        if let Some(table) = tables.get(base) {
            if table.is_fresh(self.ttl) {
                debug!("Rate cache hit for base {}", base);
                return Some(Arc::clone(table));
            }
        }

        info!("Refreshing exchange rates for base {}", base);
        match self.provider.latest(base).await {
            Ok(payload) => {
                let table = Arc::new(RateTable::from_payload(payload));
                tables.insert(base.to_string(), Arc::clone(&table));
                Some(table)
            }
            Err(e) => {
                warn!("Rate refresh failed for base {}: {}", base, e);
                None
            }
        }
    }

    /// Converts an amount to the target currency, or returns `None` when
    /// rates are unavailable or the source rate is unknown.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(amount);
        }
        let table = self.table_for(to).await?;
        table.convert(amount, from, to)
    }
}
