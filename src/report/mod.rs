//! Product report pipeline: section fetchers and the assembler that merges
//! them into one [`ProductReport`].

pub mod assemble;
pub mod catalog;
pub mod eligibility;
pub mod fees;
pub mod model;
pub mod offers;

pub use assemble::Assembler;
pub use model::{
    CatalogFacts, ConvertedFigures, Dimensions, Eligibility, FeeBreakdown, OfferRecord,
    OfferSummary, ProductReport,
};
