use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{BookingId, BookingRecord};

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait BookingRepository: Send + Sync {
    fn insert(&self, record: BookingRecord) -> Result<BookingRecord, RepositoryError>;
    fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("booking already exists")]
    Conflict,
    #[error("booking not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for booking confirmations (e-mail or CRM adapters).
pub trait BookingNotifier: Send + Sync {
    fn notify(&self, notification: BookingNotification) -> Result<(), NotifierError>;
}

/// Template name plus the values an adapter needs to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingNotification {
    pub template: String,
    pub booking_id: BookingId,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
