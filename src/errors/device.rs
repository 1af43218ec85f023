use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Invalid state, use ON or OFF")]
    InvalidState,
}

impl DeviceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeviceError::InvalidState => StatusCode::BAD_REQUEST,
        }
    }
}
