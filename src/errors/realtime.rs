#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("Realtime store request failed: {0}")]
    Request(#[from] reqwest::Error),
}
