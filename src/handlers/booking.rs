use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingRequest, Service};
use crate::services::mailer::{booking_notification, sample_booking_request};
use crate::state::AppState;

/// Validate against the shared contract and write exactly one record.
fn persist_booking(state: &AppState, req: &BookingRequest) -> Result<Booking, AppError> {
    req.validate().map_err(AppError::Validation)?;
    let service = Service::parse(&req.service)
        .ok_or_else(|| AppError::Validation(format!("unknown service: {}", req.service)))?;

    let booking = Booking::from_request(req, service);

    let db = state.db.lock().unwrap();
    queries::create_booking(&db, &booking).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(booking)
}

/// `POST /book-appointment` — persist only, no fan-out. Any failure here is
/// reported as 400.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Response {
    match persist_booking(&state, &req) {
        Ok(booking) => {
            tracing::info!(booking_id = %booking.id, "booking created");
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "success": true,
                    "message": "Booking created successfully",
                    "data": booking,
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "booking rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Error creating booking",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// `POST /api/book-appointment` — persist, mirror to the spreadsheet, then
/// email the admin, each step awaited in order. A booking persisted before a
/// later step fails stays in the store; the client still sees the failure.
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Result<Response, AppError> {
    let booking = persist_booking(&state, &req)?;
    tracing::info!(booking_id = %booking.id, "booking persisted");

    state.sheets.append(&booking).await.map_err(|e| {
        tracing::error!(booking_id = %booking.id, error = %e, "spreadsheet append failed");
        AppError::Sheets(e.to_string())
    })?;

    state
        .mailer
        .send(&booking_notification(&req))
        .await
        .map_err(|e| {
            tracing::error!(booking_id = %booking.id, error = %e, "notification email failed");
            AppError::Mail(e.to_string())
        })?;

    Ok(Json(serde_json::json!({
        "success": true,
        "bookingId": booking.id,
    }))
    .into_response())
}

/// `GET /api/test-email` — operability check for the mail transport. Sends a
/// fixed sample notification; the store is never touched.
pub async fn test_email(State(state): State<Arc<AppState>>) -> Response {
    match state
        .mailer
        .send(&booking_notification(&sample_booking_request()))
        .await
    {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Test email sent",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "test email failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Test email failed",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
