//! Read-only access to tour pricing configuration.

mod import;

pub use import::{CatalogImportError, ImportOptions, TourCatalogImporter};

use serde::{Deserialize, Serialize};

use crate::pricing::TourPricingConfig;

/// Identifier of a tour in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(pub u64);

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tour as published in the catalog, with the pricing configuration it sells under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourListing {
    pub tour_id: TourId,
    pub name: String,
    pub pricing: TourPricingConfig,
}

/// Source of pricing configuration, implemented by the storage layer.
pub trait TourCatalog: Send + Sync {
    fn pricing_config(&self, tour_id: TourId) -> Result<Option<TourPricingConfig>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("tour catalog unavailable: {0}")]
    Unavailable(String),
}
