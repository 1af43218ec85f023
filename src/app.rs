use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::{
    AnalyticsState, AuthState, DeviceState, UserState, analytics_router, auth_router,
    device_router, user_router,
};
use crate::repositories::{ConsumptionRepository, UserRepository};
use crate::services::{AuthService, FirebaseClient, OtpService, RealtimeStore};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    let realtime: Arc<dyn RealtimeStore> =
        Arc::new(FirebaseClient::new(settings.realtime.clone()));

    let user_repository = Arc::new(UserRepository::new(storage.clone()));
    let consumption_repository = Arc::new(ConsumptionRepository::new(storage.clone()));

    let auth_service = Arc::new(AuthService::new());
    let otp_service = Arc::new(OtpService::new(
        auth_service.clone(),
        user_repository.clone(),
    ));

    Router::new()
        .merge(auth_router(AuthState { otp_service }))
        .merge(user_router(UserState {
            auth_service,
            user_repository,
        }))
        .merge(device_router(DeviceState {
            realtime: realtime.clone(),
        }))
        .merge(analytics_router(AnalyticsState {
            consumption_repository,
            realtime,
        }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
