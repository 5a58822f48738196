use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};
use tour_pricing::booking::{
    BookingId, BookingNotification, BookingNotifier, BookingRecord, BookingRepository,
    NotifierError, RepositoryError,
};
use tour_pricing::catalog::{
    CatalogError, ImportOptions, TourCatalog, TourCatalogImporter, TourId, TourListing,
};
use tour_pricing::config::PricingSettings;
use tour_pricing::error::AppError;
use tour_pricing::pricing::{PricingPolicy, TourPricingConfig};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog held in memory, loaded once at startup from CSV or the built-in tours.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTourCatalog {
    tours: Arc<RwLock<HashMap<TourId, TourListing>>>,
}

impl InMemoryTourCatalog {
    pub(crate) fn from_listings(listings: Vec<TourListing>) -> Self {
        let tours = listings
            .into_iter()
            .map(|listing| (listing.tour_id, listing))
            .collect();
        Self {
            tours: Arc::new(RwLock::new(tours)),
        }
    }

    pub(crate) fn listing(&self, tour_id: TourId) -> Option<TourListing> {
        self.tours
            .read()
            .ok()
            .and_then(|guard| guard.get(&tour_id).cloned())
    }

    pub(crate) fn len(&self) -> usize {
        self.tours.read().map(|guard| guard.len()).unwrap_or_default()
    }
}

impl TourCatalog for InMemoryTourCatalog {
    fn pricing_config(&self, tour_id: TourId) -> Result<Option<TourPricingConfig>, CatalogError> {
        let guard = self
            .tours
            .read()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.get(&tour_id).map(|listing| listing.pricing))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingRepository {
    records: Arc<Mutex<HashMap<BookingId, BookingRecord>>>,
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(&self, record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))?;
        if guard.contains_key(&record.booking_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.booking_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Stands in for the e-mail adapter by writing confirmations to the log.
#[derive(Default, Clone, Copy)]
pub(crate) struct LoggingBookingNotifier;

impl BookingNotifier for LoggingBookingNotifier {
    fn notify(&self, notification: BookingNotification) -> Result<(), NotifierError> {
        info!(
            template = %notification.template,
            booking_id = %notification.booking_id.0,
            recipient = %notification.recipient,
            details = ?notification.details,
            "booking confirmation queued"
        );
        Ok(())
    }
}

/// Tours served when no catalog export is configured.
pub(crate) fn seed_catalog() -> Vec<TourListing> {
    vec![
        TourListing {
            tour_id: TourId(1),
            name: "Old Town Walking Tour".to_string(),
            pricing: TourPricingConfig {
                base_price: dec!(45.00),
                policy: PricingPolicy::Fixed,
                min_participants: 1,
                max_participants: 20,
                version: 1,
            },
        },
        TourListing {
            tour_id: TourId(2),
            name: "Harbour Kayak Trip".to_string(),
            pricing: TourPricingConfig {
                base_price: dec!(100.00),
                policy: PricingPolicy::BulkDiscount {
                    threshold: 6,
                    percentage: dec!(10),
                },
                min_participants: 1,
                max_participants: 30,
                version: 1,
            },
        },
        TourListing {
            tour_id: TourId(3),
            name: "Private Vineyard Tasting".to_string(),
            pricing: TourPricingConfig {
                base_price: dec!(120.00),
                policy: PricingPolicy::GroupRequired { min: 8, max: 15 },
                min_participants: 1,
                max_participants: 20,
                version: 1,
            },
        },
    ]
}

/// Load the catalog export named in the settings, falling back to the built-in tours.
pub(crate) fn load_catalog(settings: &PricingSettings) -> Result<InMemoryTourCatalog, AppError> {
    let listings = match &settings.catalog_path {
        Some(path) => {
            let options = ImportOptions {
                strict_policies: settings.strict_policies,
            };
            let listings = TourCatalogImporter::from_path(path, options)?;
            info!(path = %path.display(), tours = listings.len(), "tour catalog imported");
            listings
        }
        None => {
            let listings = seed_catalog();
            info!(tours = listings.len(), "using built-in tour catalog");
            listings
        }
    };

    Ok(InMemoryTourCatalog::from_listings(listings))
}
