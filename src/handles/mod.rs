pub mod analytics_handle;
pub mod auth_handle;
pub mod device_handle;
pub mod user_handle;

pub use analytics_handle::{AnalyticsState, analytics_router};
pub use auth_handle::{AuthState, auth_router};
pub use device_handle::{DeviceState, device_router};
pub use user_handle::{UserState, user_router};

use crate::errors::AuthError;

// Request bodies arrive with every field optional; the precise 400 comes
// from here rather than from a deserialization rejection.
pub(crate) fn require(field: Option<String>, name: &'static str) -> Result<String, AuthError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingField(name))
}
