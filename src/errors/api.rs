use super::{AnalyticsError, AuthError, DeviceError, RealtimeError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Analytics error: {0}")]
    AnalyticsError(#[from] AnalyticsError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Realtime store error: {0}")]
    RealtimeError(#[from] RealtimeError),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
