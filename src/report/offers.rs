//! Offer aggregation: shipping folding, sorting, reference-price selection.

use crate::report::model::{OfferRecord, OfferSummary};
use crate::spapi::client::OffersProvider;
use crate::spapi::models::OfferPayload;
use anyhow::Result;
use std::cmp::Ordering;
use tracing::debug;

/// Only new-condition offers are compared.
const OFFER_CONDITION: &str = "New";

/// Fetches and summarizes the competing offers for an identifier.
pub async fn aggregate(provider: &dyn OffersProvider, asin: &str) -> Result<OfferSummary> {
    let payloads = provider.item_offers(asin, OFFER_CONDITION).await?;
    Ok(summarize(&payloads))
}

/// Normalizes, sorts and selects the reference price from raw offers.
///
/// Offers not fulfilled by the platform get shipping folded into their
/// effective price (absent shipping counts as zero). The sort is stable and
/// ascending by effective price, so provider order breaks ties. The reference
/// price is the buy-box winner's effective price when one is flagged, else
/// the cheapest offer's, else absent. The buy-box winner takes priority even
/// when it is not the cheapest.
pub fn summarize(payloads: &[OfferPayload]) -> OfferSummary {
    let mut offers: Vec<OfferRecord> = payloads.iter().map(normalize).collect();

    offers.sort_by(|a, b| {
        a.effective_price.partial_cmp(&b.effective_price).unwrap_or(Ordering::Equal)
    });

    let reference = offers
        .iter()
        .find(|offer| offer.buy_box_winner)
        .or_else(|| offers.first());

    let (reference_price, reference_currency) = match reference {
        Some(offer) => (Some(offer.effective_price), Some(offer.currency.clone())),
        None => (None, None),
    };

    debug!(
        "Summarized {} offers, reference price: {:?} {:?}",
        offers.len(),
        reference_price,
        reference_currency
    );

    OfferSummary { offers, reference_price, reference_currency }
}

fn normalize(payload: &OfferPayload) -> OfferRecord {
    let fulfilled_by_platform = payload.is_fulfilled_by_amazon.unwrap_or(false);
    let shipping = payload.shipping.as_ref().map(|s| s.amount).unwrap_or(0.0);

    let effective_price = if fulfilled_by_platform {
        payload.listing_price.amount
    } else {
        payload.listing_price.amount + shipping
    };

    OfferRecord {
        listing_price: payload.listing_price.amount,
        shipping,
        currency: payload.listing_price.currency_code.clone(),
        fulfilled_by_platform,
        buy_box_winner: payload.is_buy_box_winner.unwrap_or(false),
        effective_price,
    }
}
