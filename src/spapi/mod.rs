//! Selling Partner API plumbing: marketplaces, credentials, HTTP client, wire types.

pub mod client;
pub mod credentials;
pub mod marketplaces;
pub mod models;

pub use client::{
    CatalogProvider, FeesProvider, OffersProvider, RestrictionsProvider, SpApiClient,
    SpApiProviders,
};
pub use credentials::{CredentialBundle, CredentialStore, RoutingError};
pub use marketplaces::{Marketplace, SpRegion};
