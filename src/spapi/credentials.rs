//! Credential bundles and region routing.
//!
//! Bundles are loaded once from the environment at startup and never mutated
//! per-request. A region with missing secrets stays unconfigured; requests
//! routed to it fail with [`RoutingError::RegionNotConfigured`].

use crate::spapi::marketplaces::{Marketplace, SpRegion};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal routing failures. Everything downstream of routing degrades
/// per-section instead of erroring.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("unsupported marketplace '{0}'")]
    UnsupportedMarketplace(String),

    #[error("no credentials configured for region {0}")]
    RegionNotConfigured(SpRegion),
}

/// LWA authorization material plus the seller identifier, scoped to one region.
#[derive(Debug, Clone)]
pub struct CredentialBundle {
    pub refresh_token: String,
    pub lwa_app_id: String,
    pub lwa_client_secret: String,
    pub seller_id: String,
}

/// Process-wide, read-only map of region to credential bundle.
#[derive(Debug, Default)]
pub struct CredentialStore {
    bundles: HashMap<SpRegion, CredentialBundle>,
}

impl CredentialStore {
    /// Creates an empty store (for tests).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads bundles from environment variables.
    ///
    /// NA reads `AMAZON_REFRESH_TOKEN`, `AMAZON_LWA_APP_ID`,
    /// `AMAZON_LWA_CLIENT_SECRET`, `AMAZON_SELLER_ID`; EU reads the same
    /// names with an `EU_` prefix; FE with an `FE_` prefix. A region with any
    /// variable missing is left unconfigured.
    pub fn from_env() -> Self {
        let mut store = Self::new();

        for (region, prefix) in
            [(SpRegion::Na, "AMAZON"), (SpRegion::Eu, "EU"), (SpRegion::Fe, "FE")]
        {
            match Self::bundle_from_env(prefix) {
                Some(bundle) => {
                    info!("Loaded {} credentials", region);
                    store.bundles.insert(region, bundle);
                }
                None => warn!("Region {} not configured (missing {}_* variables)", region, prefix),
            }
        }

        store
    }

    fn bundle_from_env(prefix: &str) -> Option<CredentialBundle> {
        let var = |suffix: &str| std::env::var(format!("{}_{}", prefix, suffix)).ok();

        Some(CredentialBundle {
            refresh_token: var("REFRESH_TOKEN")?,
            lwa_app_id: var("LWA_APP_ID")?,
            lwa_client_secret: var("LWA_CLIENT_SECRET")?,
            seller_id: var("SELLER_ID")?,
        })
    }

    /// Registers a bundle for a region (for tests and programmatic setup).
    pub fn insert(&mut self, region: SpRegion, bundle: CredentialBundle) {
        self.bundles.insert(region, bundle);
    }

    /// Returns true if any region is configured.
    pub fn is_configured(&self) -> bool {
        !self.bundles.is_empty()
    }

    /// Routes a marketplace code to its descriptor and credential bundle.
    ///
    /// The lookup is case-insensitive. Fails with `UnsupportedMarketplace`
    /// for unknown codes and `RegionNotConfigured` when the matching region
    /// has no bundle.
    pub fn route(&self, code: &str) -> Result<(Marketplace, &CredentialBundle), RoutingError> {
        let marketplace = Marketplace::from_str(code)
            .map_err(|_| RoutingError::UnsupportedMarketplace(code.to_string()))?;

        let bundle = self
            .bundles
            .get(&marketplace.region())
            .ok_or(RoutingError::RegionNotConfigured(marketplace.region()))?;

        Ok((marketplace, bundle))
    }
}
