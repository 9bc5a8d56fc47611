//! # Error Handling Middleware
//!
//! Maps slot model errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinicslots_core::errors::SlotError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicslots_api::middleware::error_handling::AppError;
/// use clinicslots_core::models::time_of_day::TimeOfDay;
///
/// async fn handler(raw: String) -> Result<Json<TimeOfDay>, AppError> {
///     let time: TimeOfDay = raw.parse()?;
///     Ok(Json(time))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotError::InvalidTime(_) => StatusCode::BAD_REQUEST,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Internal(report) => {
                error!("Internal error while serving request: {report:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `Result<T, SlotError>` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Internal(err))
    }
}

/// Maps a SlotError to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
