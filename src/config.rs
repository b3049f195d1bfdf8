//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::spapi::marketplaces::Marketplace;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Marketplace reports are built against by default
    #[serde(default)]
    pub marketplace: Marketplace,

    /// Currency to convert monetary figures into; no conversion when unset
    #[serde(default)]
    pub target_currency: Option<String>,

    /// Exchange-rate cache TTL in seconds
    #[serde(default = "default_rate_ttl_secs")]
    pub rate_ttl_secs: u64,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Override for the exchange-rate API base URL
    #[serde(default)]
    pub rate_api_url: Option<String>,

    /// Base URL of the rank-benchmark service; benchmarks are skipped when unset
    #[serde(default)]
    pub benchmark_url: Option<String>,

    /// Marketplaces whose benchmark tables are loaded at startup
    #[serde(default = "default_benchmark_marketplaces")]
    pub benchmark_marketplaces: Vec<Marketplace>,
}

fn default_rate_ttl_secs() -> u64 {
    21_600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_benchmark_marketplaces() -> Vec<Marketplace> {
    vec![Marketplace::Us, Marketplace::Ca]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marketplace: Marketplace::Us,
            target_currency: None,
            rate_ttl_secs: default_rate_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            format: OutputFormat::Table,
            rate_api_url: None,
            benchmark_url: None,
            benchmark_marketplaces: default_benchmark_marketplaces(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-intel").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(marketplace) = std::env::var("AMZ_MARKETPLACE") {
            if let Ok(m) = marketplace.parse() {
                self.marketplace = m;
            }
        }

        if let Ok(currency) = std::env::var("AMZ_CURRENCY") {
            self.target_currency = Some(currency.to_uppercase());
        }

        if let Ok(ttl) = std::env::var("AMZ_RATE_TTL") {
            if let Ok(t) = ttl.parse() {
                self.rate_ttl_secs = t;
            }
        }

        self
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
