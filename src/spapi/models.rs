//! Typed SP-API wire payloads.
//!
//! Every provider response is mapped into these structures once at the
//! client boundary; the report pipeline never inspects raw JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generic SP-API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub payload: T,
}

/// Monetary amount in SP-API's PascalCase convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    pub amount: f64,
    pub currency_code: String,
}

// --- Catalog Items ---

/// Catalog item payload: summaries, identifiers, attributes, images.
///
/// The provider does not reliably return every facet in one fetch, so the
/// client requests attributes and images separately; absent facets
/// deserialize to empty/None.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub summaries: Vec<ItemSummary>,
    #[serde(default)]
    pub identifiers: Vec<IdentifierGroup>,
    #[serde(default)]
    pub attributes: Option<ItemAttributes>,
    #[serde(default)]
    pub images: Vec<ImageGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentifierGroup {
    #[serde(default)]
    pub identifiers: Vec<ItemIdentifier>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdentifier {
    pub identifier_type: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemAttributes {
    #[serde(default)]
    pub item_package_dimensions: Vec<PackageDimensions>,
    #[serde(default)]
    pub item_package_weight: Vec<ValueUnit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDimensions {
    #[serde(default)]
    pub length: Option<ValueUnit>,
    #[serde(default)]
    pub width: Option<ValueUnit>,
    #[serde(default)]
    pub height: Option<ValueUnit>,
}

/// A raw value/unit pair as the catalog attributes report it.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueUnit {
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGroup {
    #[serde(default)]
    pub images: Vec<ItemImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemImage {
    pub link: String,
}

// --- Product Pricing (item offers) ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemOffersPayload {
    #[serde(default)]
    pub offers: Vec<OfferPayload>,
}

/// One competing offer as the pricing provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferPayload {
    pub listing_price: Money,
    #[serde(default)]
    pub shipping: Option<Money>,
    #[serde(default)]
    pub is_buy_box_winner: Option<bool>,
    #[serde(default)]
    pub is_fulfilled_by_amazon: Option<bool>,
}

// --- Listings Restrictions ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestrictionsPayload {
    #[serde(default)]
    pub restrictions: Vec<RestrictionGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestrictionGroup {
    #[serde(default)]
    pub reasons: Vec<RestrictionReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestrictionReason {
    #[serde(default)]
    pub message: Option<String>,
}

// --- Product Fees ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeesEstimateResult {
    pub status: String,
    #[serde(default)]
    pub fees_estimate: Option<FeesEstimate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeesEstimate {
    #[serde(default)]
    pub total_fees_estimate: Option<Money>,
    #[serde(default)]
    pub fee_detail_list: Vec<FeeDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeeDetail {
    pub fee_type: String,
    #[serde(default)]
    pub fee_amount: Option<Money>,
}

/// Wrapper the fees endpoint nests its result under.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeesEstimatePayload {
    pub fees_estimate_result: FeesEstimateResult,
}

/// Request body for the fees-estimate call (FBA-equivalent estimate).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeesEstimateRequest {
    pub marketplace_id: String,
    pub is_amazon_fulfilled: bool,
    pub identifier: String,
    pub price_to_estimate_fees: PriceToEstimateFees,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceToEstimateFees {
    pub listing_price: Money,
}

// --- Exchange rates ---

/// Full currency table for one base currency, as of fetch time.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesPayload {
    pub base: String,
    pub rates: HashMap<String, f64>,
}
