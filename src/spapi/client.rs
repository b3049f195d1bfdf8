//! HTTP client for SP-API requests using wreq, with LWA token exchange.

use crate::spapi::credentials::CredentialBundle;
use crate::spapi::marketplaces::Marketplace;
use crate::spapi::models::{
    CatalogItem, Envelope, FeesEstimatePayload, FeesEstimateRequest, FeesEstimateResult,
    ItemOffersPayload, Money, OfferPayload, PriceToEstimateFees, RestrictionsPayload,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use wreq::Client;

const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

/// Token refresh safety margin: a cached token is dropped this long before
/// its advertised expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Catalog metadata provider - enables mocking for tests.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches a catalog item with the requested data facets.
    async fn catalog_item(&self, asin: &str, included_data: &[&str]) -> Result<CatalogItem>;
}

/// Competing-offers provider.
#[async_trait]
pub trait OffersProvider: Send + Sync {
    /// Fetches the offer list for an item in the given condition.
    async fn item_offers(&self, asin: &str, condition: &str) -> Result<Vec<OfferPayload>>;
}

/// Sellability-restrictions provider.
#[async_trait]
pub trait RestrictionsProvider: Send + Sync {
    /// Fetches listing restrictions for an identifier/seller pair.
    async fn listing_restrictions(
        &self,
        asin: &str,
        seller_id: &str,
        condition_type: &str,
    ) -> Result<RestrictionsPayload>;
}

/// Fee-estimate provider.
#[async_trait]
pub trait FeesProvider: Send + Sync {
    /// Requests a fee breakdown for selling at the given price.
    async fn fees_estimate(
        &self,
        asin: &str,
        price: f64,
        currency: &str,
    ) -> Result<FeesEstimateResult>;
}

/// Bound for a client that serves every report section.
pub trait SpApiProviders:
    CatalogProvider + OffersProvider + RestrictionsProvider + FeesProvider
{
}

impl<T: CatalogProvider + OffersProvider + RestrictionsProvider + FeesProvider> SpApiProviders
    for T
{
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// SP-API HTTP client scoped to one marketplace and credential bundle.
pub struct SpApiClient {
    client: Client,
    marketplace: Marketplace,
    credentials: CredentialBundle,
    base_url: Option<String>,
    token_url: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl SpApiClient {
    /// Creates a new client with the given request timeout.
    pub fn new(
        marketplace: Marketplace,
        credentials: CredentialBundle,
        timeout: Duration,
    ) -> Result<Self> {
        Self::with_urls(marketplace, credentials, timeout, None, None)
    }

    /// Creates a client with custom endpoint and token URLs (for testing).
    pub fn with_urls(
        marketplace: Marketplace,
        credentials: CredentialBundle,
        timeout: Duration,
        base_url: Option<String>,
        token_url: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            marketplace,
            credentials,
            base_url,
            token_url,
            token: Mutex::new(None),
        })
    }

    /// Returns the configured marketplace.
    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| self.marketplace.endpoint().to_string())
    }

    fn token_url(&self) -> String {
        self.token_url.clone().unwrap_or_else(|| LWA_TOKEN_URL.to_string())
    }

    /// Exchanges the refresh token for an access token, caching it until
    /// shortly before expiry.
    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.value.clone());
            }
        }

        debug!("Refreshing LWA access token");

        let body = format!(
            "grant_type=refresh_token&refresh_token={}&client_id={}&client_secret={}",
            urlencoding::encode(&self.credentials.refresh_token),
            urlencoding::encode(&self.credentials.lwa_app_id),
            urlencoding::encode(&self.credentials.lwa_client_secret),
        );

        let response = self
            .client
            .post(self.token_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .context("Failed to send token request")?;

        if !response.status().is_success() {
            anyhow::bail!("Token request failed with status: {}", response.status());
        }

        let text = response.text().await.context("Failed to read token response")?;
        let token: TokenResponse =
            serde_json::from_str(&text).context("Failed to parse token response")?;

        let value = token.access_token.clone();
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken { value: token.access_token, expires_at: Instant::now() + lifetime });

        Ok(value)
    }

    /// Performs an authenticated GET and deserializes the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = self.access_token().await?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("x-amz-access-token", token)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        let text = response.text().await.context("Failed to read response body")?;
        serde_json::from_str(&text).context("Failed to parse response body")
    }

    /// Performs an authenticated POST with a JSON body.
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let token = self.access_token().await?;

        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("x-amz-access-token", token)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body)?)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        let text = response.text().await.context("Failed to read response body")?;
        serde_json::from_str(&text).context("Failed to parse response body")
    }
}

#[async_trait]
impl CatalogProvider for SpApiClient {
    async fn catalog_item(&self, asin: &str, included_data: &[&str]) -> Result<CatalogItem> {
        let url = format!(
            "{}/catalog/2022-04-01/items/{}?marketplaceIds={}&includedData={}",
            self.base_url(),
            asin,
            self.marketplace.marketplace_id(),
            included_data.join(","),
        );

        info!("Fetching catalog item: {} [{}]", asin, included_data.join(","));
        self.get_json(&url).await
    }
}

#[async_trait]
impl OffersProvider for SpApiClient {
    async fn item_offers(&self, asin: &str, condition: &str) -> Result<Vec<OfferPayload>> {
        let url = format!(
            "{}/products/pricing/v0/items/{}/offers?MarketplaceId={}&ItemCondition={}",
            self.base_url(),
            asin,
            self.marketplace.marketplace_id(),
            condition,
        );

        info!("Fetching offers: {} ({})", asin, condition);
        let envelope: Envelope<ItemOffersPayload> = self.get_json(&url).await?;
        Ok(envelope.payload.offers)
    }
}

#[async_trait]
impl RestrictionsProvider for SpApiClient {
    async fn listing_restrictions(
        &self,
        asin: &str,
        seller_id: &str,
        condition_type: &str,
    ) -> Result<RestrictionsPayload> {
        let url = format!(
            "{}/listings/2021-08-01/restrictions?asin={}&sellerId={}&marketplaceIds={}&conditionType={}",
            self.base_url(),
            asin,
            urlencoding::encode(seller_id),
            self.marketplace.marketplace_id(),
            condition_type,
        );

        info!("Checking restrictions: {} (seller {})", asin, seller_id);
        self.get_json(&url).await
    }
}

#[async_trait]
impl FeesProvider for SpApiClient {
    async fn fees_estimate(
        &self,
        asin: &str,
        price: f64,
        currency: &str,
    ) -> Result<FeesEstimateResult> {
        let url =
            format!("{}/products/fees/v0/items/{}/feesEstimate", self.base_url(), asin);

        let request = serde_json::json!({
            "FeesEstimateRequest": FeesEstimateRequest {
                marketplace_id: self.marketplace.marketplace_id().to_string(),
                is_amazon_fulfilled: true,
                identifier: asin.to_string(),
                price_to_estimate_fees: PriceToEstimateFees {
                    listing_price: Money { amount: price, currency_code: currency.to_string() },
                },
            }
        });

        info!("Estimating fees: {} at {:.2} {}", asin, price, currency);
        let envelope: Envelope<FeesEstimatePayload> = self.post_json(&url, &request).await?;
        Ok(envelope.payload.fees_estimate_result)
    }
}
