pub mod analytics;
pub mod api;
pub mod auth;
pub mod device;
pub mod realtime;

pub use analytics::AnalyticsError;
pub use api::ApiError;
pub use auth::AuthError;
pub use device::DeviceError;
pub use realtime::RealtimeError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::AuthError(e) => (e.status_code(), e.to_string()),
            ApiError::DeviceError(e) => (e.status_code(), e.to_string()),
            ApiError::AnalyticsError(e) => (e.status_code(), e.to_string()),
            ApiError::DatabaseError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::RealtimeError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Realtime store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}
