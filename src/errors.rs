use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("spreadsheet error: {0}")]
    Sheets(String),

    #[error("mail error: {0}")]
    Mail(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Error creating booking"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Booking failed"),
            AppError::Sheets(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Booking failed"),
            AppError::Mail(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Booking failed"),
        };

        let body = serde_json::json!({
            "success": false,
            "message": message,
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
