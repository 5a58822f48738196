//! Booking intake: verifies a submitted booking against the tour's pricing policy before storing it.
//!
//! Submissions carry a client-computed total. The service re-fetches the tour's pricing
//! configuration, re-runs the evaluator, and only persists bookings whose total agrees with the
//! recomputed one.

pub(crate) mod contact;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use contact::ContactViolation;
pub use domain::{
    BookingId, BookingRecord, BookingStatus, BookingSubmission, BookingView, ContactDetails,
};
pub use repository::{
    BookingNotification, BookingNotifier, BookingRepository, NotifierError, RepositoryError,
};
pub use router::booking_router;
pub use service::{BookingError, BookingIntakeService, IntakePolicy, DEFAULT_PRICE_TOLERANCE};
