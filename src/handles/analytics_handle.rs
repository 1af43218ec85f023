use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::errors::{AnalyticsError, ApiError};
use crate::models::Consumption;
use crate::repositories::ConsumptionRepository;
use crate::services::RealtimeStore;

// Realtime store nodes produced by the analytics pipeline.
const RECOMMENDATIONS_PATH: &str = "ac_data/recommendations";
const FORECAST_PATH: &str = "ac_data/predicted_next_month_kwh";
const MONTHLY_PATH: &str = "ac_data/monthly_consumption_kwh";
const ALERTS_PATH: &str = "alerts";

#[derive(Clone)]
pub struct AnalyticsState {
    pub consumption_repository: Arc<ConsumptionRepository>,
    pub realtime: Arc<dyn RealtimeStore>,
}

pub fn analytics_router(analytics_state: AnalyticsState) -> Router {
    Router::new()
        .route("/api/consumption", get(get_consumption))
        .route("/api/recommendations", get(get_recommendations))
        .route("/api/forecast", get(get_forecast))
        .route("/api/dashboard-data", get(get_dashboard_data))
        .route("/api/alerts", get(get_alerts))
        .with_state(analytics_state)
}

#[utoipa::path(
    get,
    path = "/api/consumption",
    tag = "analytics",
    responses(
        (status = 200, description = "All consumption rows, ascending id", body = Vec<Consumption>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_consumption(
    State(state): State<AnalyticsState>,
) -> Result<Json<Vec<Consumption>>, ApiError> {
    let rows = state.consumption_repository.find_all().await?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/recommendations",
    tag = "analytics",
    responses(
        (status = 200, description = "Current recommendations"),
        (status = 404, description = "No recommendations stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_recommendations(
    State(state): State<AnalyticsState>,
) -> Result<Json<Value>, ApiError> {
    let recommendations = state.realtime.get(RECOMMENDATIONS_PATH).await?;

    if recommendations.is_null() {
        return Err(AnalyticsError::NoRecommendations.into());
    }

    Ok(Json(json!({ "recommendations": recommendations })))
}

#[utoipa::path(
    get,
    path = "/api/forecast",
    tag = "analytics",
    responses(
        (status = 200, description = "Predicted consumption for next month"),
        (status = 404, description = "No forecast stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_forecast(State(state): State<AnalyticsState>) -> Result<Json<Value>, ApiError> {
    let forecast = state.realtime.get(FORECAST_PATH).await?;

    if forecast.is_null() {
        return Err(AnalyticsError::NoForecast.into());
    }

    Ok(Json(json!({
        "success": true,
        "predicted_next_month_kwh": forecast,
    })))
}

#[utoipa::path(
    get,
    path = "/api/dashboard-data",
    tag = "analytics",
    responses(
        (status = 200, description = "Monthly consumption plus forecast"),
        (status = 404, description = "No monthly data stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_dashboard_data(
    State(state): State<AnalyticsState>,
) -> Result<Json<Value>, ApiError> {
    let monthly = state.realtime.get(MONTHLY_PATH).await?;
    let forecast = state.realtime.get(FORECAST_PATH).await?;

    // The forecast may still be null; only the monthly series is mandatory.
    if monthly.is_null() {
        return Err(AnalyticsError::NoMonthlyData.into());
    }

    Ok(Json(json!({
        "success": true,
        "monthly_consumption_kwh": monthly,
        "predicted_next_month_kwh": forecast,
    })))
}

#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "analytics",
    responses(
        (status = 200, description = "All alerts, each carrying its store key as id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_alerts(State(state): State<AnalyticsState>) -> Result<Json<Value>, ApiError> {
    let alerts = state.realtime.get(ALERTS_PATH).await?;

    // Key → value map flattens into rows that carry their key as `id`.
    let alerts: Vec<Value> = alerts
        .as_object()
        .map(|entries| {
            entries
                .iter()
                .map(|(id, fields)| {
                    let mut row = fields.as_object().cloned().unwrap_or_default();
                    row.insert("id".to_string(), json!(id));
                    Value::Object(row)
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(json!({ "alerts": alerts })))
}
