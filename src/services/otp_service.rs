use std::sync::Arc;

use anyhow::anyhow;
use rand::Rng;
use time::{Duration, OffsetDateTime};

use crate::errors::{ApiError, AuthError};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::AuthService;

/// How long an issued code stays valid.
const OTP_TTL: Duration = Duration::minutes(5);

/// Name given to accounts auto-created on their first OTP request.
const PLACEHOLDER_NAME: &str = "User";

const PLACEHOLDER_PASSWORD: &str = "defaultpassword";

pub struct OtpService {
    auth_service: Arc<AuthService>,
    user_repository: Arc<UserRepository>,
}

impl OtpService {
    pub fn new(auth_service: Arc<AuthService>, user_repository: Arc<UserRepository>) -> Self {
        Self {
            auth_service,
            user_repository,
        }
    }

    /// Issue a fresh code for `phone`, overwriting any pending one.
    ///
    /// Unknown phone numbers get a placeholder account so the code has a row
    /// to live on. The outcome does not reveal whether the phone was already
    /// registered.
    pub async fn issue(&self, phone: &str) -> Result<(), ApiError> {
        let otp = generate_otp();
        let expiry = OffsetDateTime::now_utc() + OTP_TTL;

        let existing = self.user_repository.find_by_phone(phone).await?;

        let mut tx = self.user_repository.get_pool().begin().await?;

        match existing {
            Some(user) => {
                self.user_repository
                    .set_otp(user.id, &otp, expiry, &mut tx)
                    .await?;
            }
            None => {
                let password = self
                    .auth_service
                    .hash(PLACEHOLDER_PASSWORD)
                    .map_err(|e| anyhow!("Failed to hash placeholder password: {}", e))?;

                let user = User {
                    id: 0,
                    full_name: PLACEHOLDER_NAME.to_string(),
                    email: placeholder_email(),
                    phone_number: phone.to_string(),
                    password,
                    otp: Some(otp),
                    otp_expiry: Some(expiry),
                    created_at: OffsetDateTime::now_utc(),
                };

                self.user_repository.create(&user, &mut tx).await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// Check `candidate` against the pending code for `phone`.
    ///
    /// A code is consumed by its first successful verification.
    pub async fn verify(&self, phone: &str, candidate: &str) -> Result<User, ApiError> {
        let user = self
            .user_repository
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A cleared code never matches, so a consumed code fails the same
        // way as a wrong one.
        match user.otp.as_deref() {
            Some(stored) if stored == candidate => {}
            _ => return Err(AuthError::InvalidOtp.into()),
        }

        // Exactly-at-expiry still passes.
        let expiry = user.otp_expiry.ok_or(AuthError::InvalidOtp)?;
        if OffsetDateTime::now_utc() > expiry {
            return Err(AuthError::OtpExpired.into());
        }

        let mut tx = self.user_repository.get_pool().begin().await?;
        self.user_repository.clear_otp(user.id, &mut tx).await?;
        tx.commit().await?;

        Ok(user)
    }
}

/// Uniform 6-digit code.
fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Random local part so auto-created accounts never collide on the unique
/// email column.
fn placeholder_email() -> String {
    let tag: u64 = rand::random();
    format!("{tag:016x}@example.com")
}
