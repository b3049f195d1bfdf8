//! Report assembly: fan-out to the data sources, fan-in with per-section
//! failure containment.
//!
//! Only routing failures and unexpected internal faults abort a request;
//! every sub-fetch failure degrades its own section to defaults and the
//! report still assembles. The degrade decisions are explicit matches here,
//! not suppressed exceptions.

use crate::benchmark::BenchmarkTables;
use crate::rates::ExchangeRateCache;
use crate::report::model::{ConvertedFigures, FeeBreakdown, ProductReport};
use crate::report::{catalog, eligibility, fees, offers};
use crate::spapi::client::{CatalogProvider, FeesProvider, OffersProvider, RestrictionsProvider};
use crate::spapi::marketplaces::Marketplace;
use tracing::{info, warn};

/// Assembles product reports from the upstream providers.
///
/// Providers, the rate cache and the benchmark tables are injected at
/// construction so tests can substitute doubles; nothing is read from
/// ambient global state.
pub struct Assembler<'a> {
    catalog: &'a dyn CatalogProvider,
    restrictions: &'a dyn RestrictionsProvider,
    offers: &'a dyn OffersProvider,
    fees: &'a dyn FeesProvider,
    rates: &'a ExchangeRateCache,
    benchmarks: &'a BenchmarkTables,
}

impl<'a> Assembler<'a> {
    pub fn new(
        catalog: &'a dyn CatalogProvider,
        restrictions: &'a dyn RestrictionsProvider,
        offers: &'a dyn OffersProvider,
        fees: &'a dyn FeesProvider,
        rates: &'a ExchangeRateCache,
        benchmarks: &'a BenchmarkTables,
    ) -> Self {
        Self { catalog, restrictions, offers, fees, rates, benchmarks }
    }

    /// Builds the report for one identifier.
    ///
    /// Phase 1 runs the independent fetches concurrently; phase 2 estimates
    /// fees (needs the reference price) and converts currencies; phase 3
    /// attaches the rank benchmark. Routing has already happened by the time
    /// this runs, so assembly itself cannot fail.
    pub async fn assemble(
        &self,
        asin: &str,
        marketplace: Marketplace,
        seller_id: &str,
        target_currency: Option<&str>,
    ) -> ProductReport {
        info!("Assembling report for {} on {}", asin, marketplace);

        let mut report = ProductReport::new(asin, marketplace.to_string());

        // Phase 1: independent fetches.
        let (catalog_result, eligibility_result, offers_result) = tokio::join!(
            catalog::resolve(self.catalog, asin),
            eligibility::check(self.restrictions, asin, seller_id),
            offers::aggregate(self.offers, asin),
        );

        match catalog_result {
            Ok(facts) => {
                report.title = facts.title;
                report.brand = facts.brand;
                report.ean = facts.ean;
                report.image_url = facts.image_url;
                report.dimensions_display = facts.dimensions.as_ref().map(|d| d.display());
                report.dimensions = facts.dimensions;
                report.weight_grams = facts.weight_grams;
            }
            Err(e) => warn!("Catalog section degraded for {}: {}", asin, e),
        }

        match eligibility_result {
            Ok(eligibility) => {
                report.sellable = Some(eligibility.sellable);
                report.restriction_reasons = eligibility.reasons;
            }
            // Unknown, not sellable and not unsellable.
            Err(e) => warn!("Eligibility section degraded for {}: {}", asin, e),
        }

        match offers_result {
            Ok(summary) => {
                report.offers = summary.offers;
                report.reference_price = summary.reference_price;
                report.reference_currency = summary.reference_currency;
            }
            Err(e) => warn!("Offers section degraded for {}: {}", asin, e),
        }

        // Phase 2: fees need the reference price; without one the estimate
        // is skipped outright.
        report.fees = match (&report.reference_price, &report.reference_currency) {
            (Some(price), Some(currency)) => {
                match fees::estimate(self.fees, asin, *price, currency).await {
                    Ok(breakdown) => breakdown,
                    Err(e) => {
                        warn!("Fees section degraded for {}: {}", asin, e);
                        FeeBreakdown::unavailable()
                    }
                }
            }
            _ => FeeBreakdown::unavailable(),
        };

        if let Some(target) = target_currency {
            report.converted = self.convert_figures(&report, target).await;
        }

        // Phase 3: benchmark attach, no upstream dependency.
        report.rank_benchmarks = self.benchmarks.get(marketplace).cloned();

        report
    }

    /// Converts the present monetary figures to the target currency. Absent
    /// figures stay absent; unavailable rates drop the whole section so the
    /// report stays usable with unconverted amounts.
    async fn convert_figures(
        &self,
        report: &ProductReport,
        target: &str,
    ) -> Option<ConvertedFigures> {
        let source = report.reference_currency.as_deref()?;

        let convert = |amount: Option<f64>| async move {
            match amount {
                Some(value) => self.rates.convert(value, source, target).await,
                None => None,
            }
        };

        let figures = ConvertedFigures {
            currency: target.to_string(),
            reference_price: convert(report.reference_price).await,
            referral_fee: convert(report.fees.referral_fee).await,
            fulfillment_fee: convert(report.fees.fulfillment_fee).await,
            total_fees: convert(report.fees.total_fees).await,
            net_profit: convert(report.fees.net_profit).await,
        };

        if figures.reference_price.is_none()
            && figures.referral_fee.is_none()
            && figures.fulfillment_fee.is_none()
            && figures.total_fees.is_none()
            && figures.net_profit.is_none()
        {
            return None;
        }

        Some(figures)
    }
}
