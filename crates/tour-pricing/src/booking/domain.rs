use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::TourId;
use crate::pricing::PricingResult;

/// Identifier wrapper for stored bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

/// Booking request as submitted by the booking form.
///
/// `total_price` is whatever the client computed and is verified before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSubmission {
    pub tour_id: TourId,
    pub participants: i64,
    pub total_price: Decimal,
    pub contact: ContactDetails,
}

/// Contact fields collected alongside a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
}

impl BookingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
        }
    }
}

/// Persisted booking. `pricing` is the server-side evaluation that justified it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: BookingId,
    pub tour_id: TourId,
    pub contact: ContactDetails,
    pub status: BookingStatus,
    pub pricing: PricingResult,
    pub pricing_version: u32,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn total_price(&self) -> Decimal {
        self.pricing.total_price
    }

    pub fn view(&self) -> BookingView {
        BookingView {
            booking_id: self.booking_id.clone(),
            tour_id: self.tour_id,
            status: self.status.label(),
            participants: self.pricing.participants,
            total_price: self.pricing.display().total_price,
            pricing_version: self.pricing_version,
            created_at: self.created_at,
        }
    }
}

/// Public representation of a booking returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub booking_id: BookingId,
    pub tour_id: TourId,
    pub status: &'static str,
    pub participants: u32,
    pub total_price: Decimal,
    pub pricing_version: u32,
    pub created_at: DateTime<Utc>,
}
