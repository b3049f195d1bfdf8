//! Report data model: the assembled output and its section types.
//!
//! Absence is always expressed with `Option`, never sentinel strings; "N/A"
//! only appears in human-readable formatter output.

use crate::benchmark::BenchmarkTable;
use serde::{Deserialize, Serialize};

/// Package dimensions normalized to centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    /// Composed human-readable string, emitted only when all three axes are
    /// known.
    pub fn display(&self) -> String {
        format!("{:.2} x {:.2} x {:.2} cm", self.length_cm, self.width_cm, self.height_cm)
    }
}

/// Catalog metadata section of a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFacts {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub ean: Option<String>,
    pub image_url: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub weight_grams: Option<f64>,
}

/// Sellability result reduced from the restrictions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eligibility {
    pub sellable: bool,
    pub reasons: Vec<String>,
}

/// A normalized competing offer.
///
/// `effective_price` folds shipping into the listing price for offers the
/// platform does not fulfill itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRecord {
    pub listing_price: f64,
    pub shipping: f64,
    pub currency: String,
    pub fulfilled_by_platform: bool,
    pub buy_box_winner: bool,
    pub effective_price: f64,
}

/// Sorted offers plus the selected reference price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferSummary {
    pub offers: Vec<OfferRecord>,
    pub reference_price: Option<f64>,
    pub reference_currency: Option<String>,
}

/// Fee figures for selling at the reference price.
///
/// All fields are `None` when the estimate could not be made; `None` means
/// "could not determine", never "zero fees".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub referral_fee: Option<f64>,
    pub fulfillment_fee: Option<f64>,
    pub total_fees: Option<f64>,
    pub net_profit: Option<f64>,
    pub currency: Option<String>,
}

impl FeeBreakdown {
    /// The all-None breakdown used when no estimate is possible.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Returns true when no fee figure could be determined.
    pub fn is_unavailable(&self) -> bool {
        self.total_fees.is_none() && self.referral_fee.is_none() && self.net_profit.is_none()
    }
}

/// Monetary figures converted into the target currency.
///
/// Mirrors every monetary report field: a field present in the report is
/// converted, an absent one stays absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedFigures {
    pub currency: String,
    pub reference_price: Option<f64>,
    pub referral_fee: Option<f64>,
    pub fulfillment_fee: Option<f64>,
    pub total_fees: Option<f64>,
    pub net_profit: Option<f64>,
}

/// The assembled product intelligence report.
///
/// Built once per request, immutable once returned, never persisted. Sections
/// whose sub-fetch failed carry their default values; the report itself is
/// still a success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReport {
    pub asin: String,
    pub marketplace: String,

    pub title: Option<String>,
    pub brand: Option<String>,
    pub ean: Option<String>,
    pub image_url: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub dimensions_display: Option<String>,
    pub weight_grams: Option<f64>,

    /// `None` means "unknown" (restrictions check failed), which callers must
    /// not conflate with sellable.
    pub sellable: Option<bool>,
    pub restriction_reasons: Vec<String>,

    pub offers: Vec<OfferRecord>,
    pub reference_price: Option<f64>,
    pub reference_currency: Option<String>,

    pub fees: FeeBreakdown,
    pub converted: Option<ConvertedFigures>,

    pub rank_benchmarks: Option<BenchmarkTable>,
}

impl ProductReport {
    /// Creates an empty report shell for an identifier/marketplace pair.
    pub fn new(asin: impl Into<String>, marketplace: impl Into<String>) -> Self {
        Self {
            asin: asin.into(),
            marketplace: marketplace.into(),
            title: None,
            brand: None,
            ean: None,
            image_url: None,
            dimensions: None,
            dimensions_display: None,
            weight_grams: None,
            sellable: None,
            restriction_reasons: Vec::new(),
            offers: Vec::new(),
            reference_price: None,
            reference_currency: None,
            fees: FeeBreakdown::unavailable(),
            converted: None,
            rank_benchmarks: None,
        }
    }
}
