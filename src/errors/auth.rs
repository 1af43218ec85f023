use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Email or phone number already in use")]
    AccountExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired")]
    OtpExpired,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::AccountExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidOtp => StatusCode::UNAUTHORIZED,
            AuthError::OtpExpired => StatusCode::UNAUTHORIZED,
        }
    }
}
