use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("No recommendations found")]
    NoRecommendations,

    #[error("No forecast value found")]
    NoForecast,

    #[error("No monthly data found")]
    NoMonthlyData,
}

impl AnalyticsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::NoRecommendations => StatusCode::NOT_FOUND,
            AnalyticsError::NoForecast => StatusCode::NOT_FOUND,
            AnalyticsError::NoMonthlyData => StatusCode::NOT_FOUND,
        }
    }
}
