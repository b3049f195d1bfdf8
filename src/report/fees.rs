//! Fee estimation and net-profit computation.

use crate::report::model::FeeBreakdown;
use crate::spapi::client::FeesProvider;
use crate::spapi::models::FeesEstimateResult;
use anyhow::Result;
use tracing::{debug, warn};

const REFERRAL_FEE_TYPE: &str = "ReferralFee";
const FULFILLMENT_FEE_TYPE: &str = "FBAFees";

/// Requests a fee estimate for selling at the reference price and reduces it
/// to a breakdown. The caller skips this entirely when there is no reference
/// price; fees cannot be estimated without one.
pub async fn estimate(
    provider: &dyn FeesProvider,
    asin: &str,
    price: f64,
    currency: &str,
) -> Result<FeeBreakdown> {
    let result = provider.fees_estimate(asin, price, currency).await?;
    Ok(breakdown_from(&result, price, currency))
}

/// Reduces a provider result to fee figures.
///
/// A non-"Success" status yields all-None: null signals "could not
/// determine", zero would falsely imply "no fees". Referral and fulfillment
/// components are matched by type tag; a missing component defaults to 0.0,
/// unmatched types are ignored. Net profit subtracts the provider's explicit
/// total when one is supplied, else the sum of the two known components.
pub fn breakdown_from(result: &FeesEstimateResult, price: f64, currency: &str) -> FeeBreakdown {
    if result.status != "Success" {
        warn!("Fee estimate not usable, status: {}", result.status);
        return FeeBreakdown::unavailable();
    }

    let Some(estimate) = &result.fees_estimate else {
        warn!("Fee estimate succeeded but carried no figures");
        return FeeBreakdown::unavailable();
    };

    let component = |fee_type: &str| {
        estimate
            .fee_detail_list
            .iter()
            .find(|detail| detail.fee_type == fee_type)
            .and_then(|detail| detail.fee_amount.as_ref())
            .map(|money| money.amount)
            .unwrap_or(0.0)
    };

    let referral = component(REFERRAL_FEE_TYPE);
    let fulfillment = component(FULFILLMENT_FEE_TYPE);

    let total = estimate
        .total_fees_estimate
        .as_ref()
        .map(|money| money.amount)
        .unwrap_or(referral + fulfillment);

    let net_profit = price - total;

    debug!(
        "Fees: referral {:.2}, fulfillment {:.2}, total {:.2}, net {:.2} {}",
        referral, fulfillment, total, net_profit, currency
    );

    FeeBreakdown {
        referral_fee: Some(referral),
        fulfillment_fee: Some(fulfillment),
        total_fees: Some(total),
        net_profit: Some(net_profit),
        currency: Some(currency.to_string()),
    }
}
