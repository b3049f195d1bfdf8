//! amz-intel - Product intelligence reports from the Selling Partner API
//!
//! Given an ASIN and a marketplace, answers: is it sellable, what does it
//! cost, and is it profitable. Fans out to the catalog, offers, restrictions
//! and fees endpoints and merges the results into one normalized report.

pub mod benchmark;
pub mod commands;
pub mod config;
pub mod format;
pub mod rates;
pub mod report;
pub mod spapi;
pub mod units;

pub use config::Config;
pub use report::ProductReport;
pub use spapi::credentials::CredentialStore;
pub use spapi::marketplaces::Marketplace;
