use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::handles::require;
use crate::services::OtpService;

#[derive(Clone)]
pub struct AuthState {
    pub otp_service: Arc<OtpService>,
}

pub fn auth_router(auth_state: AuthState) -> Router {
    Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .with_state(auth_state)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub phone: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifiedUser {
    pub id: i32,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub user: VerifiedUser,
}

#[utoipa::path(
    post,
    path = "/auth/send-otp",
    tag = "auth",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued and stored", body = SendOtpResponse),
        (status = 400, description = "Phone number missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn send_otp(
    State(state): State<AuthState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let phone = require(body.phone, "Phone number")?;

    state.otp_service.issue(&phone).await?;

    Ok(Json(SendOtpResponse {
        success: true,
        message: "OTP sent successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/auth/verify-otp",
    tag = "auth",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Code accepted and consumed", body = VerifyOtpResponse),
        (status = 400, description = "Phone or OTP missing"),
        (status = 401, description = "Wrong or expired code"),
        (status = 404, description = "No user for this phone number"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn verify_otp(
    State(state): State<AuthState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let phone = require(body.phone, "Phone number")?;
    let otp = require(body.otp, "OTP")?;

    let user = state.otp_service.verify(&phone, &otp).await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        message: "OTP verified successfully".to_string(),
        user: VerifiedUser {
            id: user.id,
            phone_number: user.phone_number,
        },
    }))
}
