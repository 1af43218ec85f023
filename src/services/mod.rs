pub mod auth_service;
pub mod otp_service;
pub mod realtime_service;

pub use auth_service::AuthService;
pub use otp_service::OtpService;
#[cfg(feature = "mock")]
pub use realtime_service::MemoryRealtime;
pub use realtime_service::{FirebaseClient, RealtimeStore};
