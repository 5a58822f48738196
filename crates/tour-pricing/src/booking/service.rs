use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use super::contact::{sanitize_contact, ContactViolation};
use super::domain::{BookingId, BookingRecord, BookingStatus, BookingSubmission};
use super::repository::{BookingNotification, BookingNotifier, BookingRepository, RepositoryError};
use crate::catalog::{CatalogError, TourCatalog, TourId};
use crate::pricing::{evaluate, PricingError, PricingResult, TourPricingConfig};

/// Largest accepted gap between a client-submitted total and the recomputed one.
pub const DEFAULT_PRICE_TOLERANCE: Decimal = dec!(0.01);

/// Intake rules that are configured per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakePolicy {
    pub price_tolerance: Decimal,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            price_tolerance: DEFAULT_PRICE_TOLERANCE,
        }
    }
}

/// Service composing the tour catalog, pricing evaluator, booking repository, and notifier.
pub struct BookingIntakeService<C, R, N> {
    catalog: Arc<C>,
    repository: Arc<R>,
    notifier: Arc<N>,
    policy: IntakePolicy,
}

static BOOKING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_booking_id() -> BookingId {
    let id = BOOKING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BookingId(format!("bk-{id:06}"))
}

impl<C, R, N> BookingIntakeService<C, R, N>
where
    C: TourCatalog + 'static,
    R: BookingRepository + 'static,
    N: BookingNotifier + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>, notifier: Arc<N>, policy: IntakePolicy) -> Self {
        Self {
            catalog,
            repository,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> IntakePolicy {
        self.policy
    }

    /// Price a prospective booking without storing anything.
    pub fn preview(
        &self,
        tour_id: TourId,
        participants: i64,
    ) -> Result<PricingResult, BookingError> {
        let config = self.pricing_config(tour_id)?;
        let result = evaluate(&config, participants)?;
        Ok(result)
    }

    /// Verify a submission against the tour's current pricing and store it.
    ///
    /// The stored total is always the recomputed one; a submitted total outside the
    /// tolerance is rejected rather than corrected.
    pub fn submit(&self, submission: BookingSubmission) -> Result<BookingRecord, BookingError> {
        let BookingSubmission {
            tour_id,
            participants,
            total_price,
            contact,
        } = submission;

        let contact = sanitize_contact(contact)?;
        let config = self.pricing_config(tour_id)?;
        let pricing = evaluate(&config, participants)?;

        // an out-of-range submitted total cannot be within tolerance of any real price
        let within_tolerance = total_price
            .checked_sub(pricing.total_price)
            .is_some_and(|gap| gap.abs() <= self.policy.price_tolerance);
        if !within_tolerance {
            warn!(
                %tour_id,
                participants,
                submitted = %total_price,
                expected = %pricing.total_price,
                "rejecting booking with mismatched total"
            );
            return Err(BookingError::PriceMismatch {
                submitted: total_price,
                expected: pricing.total_price,
            });
        }

        let record = BookingRecord {
            booking_id: next_booking_id(),
            tour_id,
            contact,
            status: BookingStatus::Pending,
            pricing,
            pricing_version: config.version,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            booking_id = %stored.booking_id.0,
            %tour_id,
            participants = stored.pricing.participants,
            total = %stored.total_price(),
            "booking stored"
        );

        self.dispatch_confirmation(&stored);
        Ok(stored)
    }

    /// Fetch a stored booking for API responses.
    pub fn get(&self, booking_id: &BookingId) -> Result<BookingRecord, BookingError> {
        let record = self
            .repository
            .fetch(booking_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn pricing_config(&self, tour_id: TourId) -> Result<TourPricingConfig, BookingError> {
        self.catalog
            .pricing_config(tour_id)?
            .ok_or(BookingError::TourNotFound(tour_id))
    }

    fn dispatch_confirmation(&self, record: &BookingRecord) {
        let mut details = BTreeMap::new();
        details.insert("tour_id".to_string(), record.tour_id.to_string());
        details.insert(
            "participants".to_string(),
            record.pricing.participants.to_string(),
        );
        details.insert(
            "total_price".to_string(),
            record.pricing.display().total_price.to_string(),
        );
        if let Some(date) = record.contact.preferred_date {
            details.insert("preferred_date".to_string(), date.to_string());
        }

        let notification = BookingNotification {
            template: "booking_received".to_string(),
            booking_id: record.booking_id.clone(),
            recipient: record.contact.email.clone(),
            details,
        };

        if let Err(err) = self.notifier.notify(notification) {
            warn!(booking_id = %record.booking_id.0, error = %err, "booking confirmation not sent");
        }
    }
}

/// Error raised by the booking intake service.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    InvalidContact(#[from] ContactViolation),
    #[error("tour {0} does not exist")]
    TourNotFound(TourId),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("submitted total {submitted} does not match the tour price {expected}")]
    PriceMismatch { submitted: Decimal, expected: Decimal },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BookingError {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidContact(_) => "invalid_contact",
            BookingError::TourNotFound(_) => "tour_not_found",
            BookingError::Pricing(err) => err.kind(),
            BookingError::PriceMismatch { .. } => "price_mismatch",
            BookingError::Repository(RepositoryError::NotFound) => "not_found",
            BookingError::Catalog(_) | BookingError::Repository(_) => "internal",
        }
    }
}
