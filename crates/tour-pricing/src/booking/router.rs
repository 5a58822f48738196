use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::{BookingId, BookingSubmission, ContactDetails};
use super::repository::{BookingNotifier, BookingRepository, RepositoryError};
use super::service::{BookingError, BookingIntakeService};
use crate::catalog::{TourCatalog, TourId};
use crate::pricing::{participants_from_value, PricingDisplay, PricingError, PricingResult};

/// Router builder exposing the pricing preview and booking intake endpoints.
pub fn booking_router<C, R, N>(service: Arc<BookingIntakeService<C, R, N>>) -> Router
where
    C: TourCatalog + 'static,
    R: BookingRepository + 'static,
    N: BookingNotifier + 'static,
{
    Router::new()
        .route("/api/v1/pricing/preview", post(preview_handler::<C, R, N>))
        .route("/api/v1/bookings", post(submit_handler::<C, R, N>))
        .route(
            "/api/v1/bookings/:booking_id",
            get(status_handler::<C, R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewRequest {
    pub(crate) tour_id: TourId,
    #[serde(default)]
    pub(crate) participants: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewResponse {
    pub(crate) tour_id: TourId,
    #[serde(flatten)]
    pub(crate) pricing: PricingResult,
    pub(crate) display: PricingDisplay,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingRequest {
    pub(crate) tour_id: TourId,
    #[serde(default)]
    pub(crate) participants: Value,
    pub(crate) total_price: Decimal,
    #[serde(flatten)]
    pub(crate) contact: ContactDetails,
}

pub(crate) async fn preview_handler<C, R, N>(
    State(service): State<Arc<BookingIntakeService<C, R, N>>>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response
where
    C: TourCatalog + 'static,
    R: BookingRepository + 'static,
    N: BookingNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let outcome = participants_from_value(&request.participants)
        .map_err(BookingError::from)
        .and_then(|participants| service.preview(request.tour_id, participants));

    match outcome {
        Ok(pricing) => {
            let display = pricing.display();
            let body = PreviewResponse {
                tour_id: request.tour_id,
                pricing,
                display,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn submit_handler<C, R, N>(
    State(service): State<Arc<BookingIntakeService<C, R, N>>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Response
where
    C: TourCatalog + 'static,
    R: BookingRepository + 'static,
    N: BookingNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let participants = match participants_from_value(&request.participants) {
        Ok(participants) => participants,
        Err(error) => return error_response(&BookingError::from(error)),
    };

    let submission = BookingSubmission {
        tour_id: request.tour_id,
        participants,
        total_price: request.total_price,
        contact: request.contact,
    };

    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn status_handler<C, R, N>(
    State(service): State<Arc<BookingIntakeService<C, R, N>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    C: TourCatalog + 'static,
    R: BookingRepository + 'static,
    N: BookingNotifier + 'static,
{
    match service.get(&BookingId(booking_id)) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(error) => error_response(&error),
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "kind": "invalid_input",
        "message": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) fn error_response(error: &BookingError) -> Response {
    let status = match error {
        BookingError::Pricing(
            PricingError::InvalidConfiguration(_) | PricingError::Overflow { .. },
        ) => StatusCode::INTERNAL_SERVER_ERROR,
        BookingError::InvalidContact(_)
        | BookingError::Pricing(_)
        | BookingError::PriceMismatch { .. } => StatusCode::BAD_REQUEST,
        BookingError::TourNotFound(_) | BookingError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        BookingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BookingError::Catalog(_) | BookingError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut body = serde_json::Map::new();
    body.insert("kind".to_string(), json!(error.kind()));
    body.insert("message".to_string(), json!(error.to_string()));

    match error {
        BookingError::Pricing(pricing) => body.extend(pricing.bounds()),
        BookingError::TourNotFound(tour_id) => {
            body.insert("tourId".to_string(), json!(tour_id));
        }
        BookingError::PriceMismatch {
            submitted,
            expected,
        } => {
            body.insert("submitted".to_string(), json!(submitted));
            body.insert("expected".to_string(), json!(expected));
        }
        _ => {}
    }

    (status, Json(Value::Object(body))).into_response()
}
