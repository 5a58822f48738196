use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::booking::domain::{BookingId, BookingRecord, BookingSubmission, ContactDetails};
use crate::booking::repository::{
    BookingNotification, BookingNotifier, BookingRepository, NotifierError, RepositoryError,
};
use crate::booking::{booking_router, BookingIntakeService, IntakePolicy};
use crate::catalog::{CatalogError, TourCatalog, TourId};
use crate::pricing::{PricingPolicy, TourPricingConfig};

pub(super) const FIXED_TOUR: TourId = TourId(1);
pub(super) const BULK_TOUR: TourId = TourId(2);
pub(super) const GROUP_TOUR: TourId = TourId(3);
pub(super) const MISSING_TOUR: TourId = TourId(404);

pub(super) fn pricing(policy: PricingPolicy) -> TourPricingConfig {
    TourPricingConfig {
        base_price: dec!(100),
        policy,
        min_participants: 1,
        max_participants: 20,
        version: 4,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    tours: Arc<Mutex<HashMap<TourId, TourPricingConfig>>>,
}

impl MemoryCatalog {
    pub(super) fn standard() -> Self {
        let catalog = Self::default();
        {
            let mut tours = catalog.tours.lock().expect("catalog mutex poisoned");
            tours.insert(FIXED_TOUR, pricing(PricingPolicy::Fixed));
            tours.insert(
                BULK_TOUR,
                pricing(PricingPolicy::BulkDiscount {
                    threshold: 6,
                    percentage: dec!(10),
                }),
            );
            tours.insert(
                GROUP_TOUR,
                pricing(PricingPolicy::GroupRequired { min: 8, max: 15 }),
            );
        }
        catalog
    }

    pub(super) fn replace(&self, tour_id: TourId, config: TourPricingConfig) {
        self.tours
            .lock()
            .expect("catalog mutex poisoned")
            .insert(tour_id, config);
    }
}

impl TourCatalog for MemoryCatalog {
    fn pricing_config(&self, tour_id: TourId) -> Result<Option<TourPricingConfig>, CatalogError> {
        let guard = self.tours.lock().expect("catalog mutex poisoned");
        Ok(guard.get(&tour_id).copied())
    }
}

pub(super) struct OfflineCatalog;

impl TourCatalog for OfflineCatalog {
    fn pricing_config(&self, _tour_id: TourId) -> Result<Option<TourPricingConfig>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<BookingId, BookingRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl BookingRepository for MemoryRepository {
    fn insert(&self, record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.booking_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.booking_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl BookingRepository for UnavailableRepository {
    fn insert(&self, _record: BookingRecord) -> Result<BookingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<BookingNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<BookingNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl BookingNotifier for MemoryNotifier {
    fn notify(&self, notification: BookingNotification) -> Result<(), NotifierError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl BookingNotifier for FailingNotifier {
    fn notify(&self, _notification: BookingNotification) -> Result<(), NotifierError> {
        Err(NotifierError::Transport("smtp relay refused".to_string()))
    }
}

pub(super) type TestService = BookingIntakeService<MemoryCatalog, MemoryRepository, MemoryNotifier>;

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryCatalog>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let catalog = Arc::new(MemoryCatalog::standard());
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = BookingIntakeService::new(
        catalog.clone(),
        repository.clone(),
        notifier.clone(),
        IntakePolicy::default(),
    );
    (service, catalog, repository, notifier)
}

pub(super) fn contact() -> ContactDetails {
    ContactDetails {
        name: "Ana Ruiz".to_string(),
        email: "ana.ruiz@example.com".to_string(),
        phone: Some("+34 600 123 456".to_string()),
        preferred_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 14),
        notes: Some("Two vegetarians in the group".to_string()),
    }
}

pub(super) fn submission(tour_id: TourId, participants: i64, total_price: Decimal) -> BookingSubmission {
    BookingSubmission {
        tour_id,
        participants,
        total_price,
        contact: contact(),
    }
}

pub(super) fn booking_payload(tour_id: TourId, participants: Value, total_price: Value) -> Value {
    serde_json::json!({
        "tourId": tour_id.0,
        "participants": participants,
        "totalPrice": total_price,
        "name": "Ana Ruiz",
        "email": "ana.ruiz@example.com",
        "preferredDate": "2026-06-14",
    })
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    booking_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn details(notification: &BookingNotification) -> &BTreeMap<String, String> {
    &notification.details
}
