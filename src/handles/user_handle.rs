use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::errors::{ApiError, AuthError};
use crate::handles::require;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::AuthService;

#[derive(Clone)]
pub struct UserState {
    pub auth_service: Arc<AuthService>,
    pub user_repository: Arc<UserRepository>,
}

pub fn user_router(user_state: UserState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", post(profile))
        .with_state(user_state)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileRequest {
    pub email: Option<String>,
}

/// Fixed projection of a user row: never the password or OTP fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: ProfileUser,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = RegisterResponse),
        (status = 400, description = "Missing field"),
        (status = 409, description = "Email or phone number already in use"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<UserState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let full_name = require(body.full_name, "Full name")?;
    let email = require(body.email, "Email")?;
    let password = require(body.password, "Password")?;
    let phone_number = require(body.phone_number, "Phone number")?;

    let hash = state
        .auth_service
        .hash(&password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let user = User {
        id: 0,
        full_name,
        email: email.clone(),
        phone_number,
        password: hash,
        otp: None,
        otp_expiry: None,
        created_at: OffsetDateTime::now_utc(),
    };

    // The unique columns are the source of truth; no pre-check.
    let mut tx = state.user_repository.get_pool().begin().await?;
    let id = match state.user_repository.create(&user, &mut tx).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AuthError::AccountExists.into());
        }
        Err(e) => return Err(e.into()),
    };
    tx.commit().await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: UserSummary { id, email },
    }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<UserState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = require(body.email, "Email")?;
    let password = require(body.password, "Password")?;

    // Unknown email and wrong password fail identically.
    let user = state
        .user_repository
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = state
        .auth_service
        .verify(&user.password, &password)
        .map_err(|e| anyhow!("Failed to verify password: {}", e))?;

    if !valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserSummary {
            id: user.id,
            email: user.email,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "user",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile projection", body = ProfileResponse),
        (status = 400, description = "Missing field"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn profile(
    State(state): State<UserState>,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let email = require(body.email, "Email")?;

    let user = state
        .user_repository
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(ProfileResponse {
        message: "Profile fetched successfully".to_string(),
        user: ProfileUser {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone_number: user.phone_number,
            created_at: user.created_at,
        },
    }))
}
