use std::sync::Arc;

use axum::Router;
use serde_json::Value;

use enersync_server::configs::schema::SchemaManager;
use enersync_server::configs::settings::Database;
use enersync_server::configs::storage::Storage;
use enersync_server::handles::{
    AnalyticsState, AuthState, DeviceState, UserState, analytics_router, auth_router,
    device_router, user_router,
};
use enersync_server::repositories::{ConsumptionRepository, UserRepository};
use enersync_server::services::{AuthService, MemoryRealtime, OtpService, RealtimeStore};

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub realtime: Arc<MemoryRealtime>,
    pub auth_service: Arc<AuthService>,
    pub user_repository: Arc<UserRepository>,
    pub consumption_repository: Arc<ConsumptionRepository>,
    pub otp_service: Arc<OtpService>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let realtime = Arc::new(MemoryRealtime::new());
        let auth_service = Arc::new(AuthService::new());
        let user_repository = Arc::new(UserRepository::new(storage.clone()));
        let consumption_repository = Arc::new(ConsumptionRepository::new(storage.clone()));
        let otp_service = Arc::new(OtpService::new(
            auth_service.clone(),
            user_repository.clone(),
        ));

        Self {
            storage,
            realtime,
            auth_service,
            user_repository,
            consumption_repository,
            otp_service,
            router: Router::new(),
        }
    }

    pub fn with_auth_handle(mut self) -> Self {
        self.router = self.router.merge(auth_router(AuthState {
            otp_service: self.otp_service.clone(),
        }));
        self
    }

    pub fn with_user_handle(mut self) -> Self {
        self.router = self.router.merge(user_router(UserState {
            auth_service: self.auth_service.clone(),
            user_repository: self.user_repository.clone(),
        }));
        self
    }

    pub fn with_device_handle(mut self) -> Self {
        let realtime = self.realtime_store();
        self.router = self.router.merge(device_router(DeviceState { realtime }));
        self
    }

    pub fn with_analytics_handle(mut self) -> Self {
        let realtime = self.realtime_store();
        self.router = self.router.merge(analytics_router(AnalyticsState {
            consumption_repository: self.consumption_repository.clone(),
            realtime,
        }));
        self
    }

    fn realtime_store(&self) -> Arc<dyn RealtimeStore> {
        self.realtime.clone()
    }

    pub async fn seed_realtime(&self, path: &str, value: Value) {
        self.realtime.set(path, &value).await.unwrap();
    }

    pub async fn seed_consumption(&self) {
        for (period, kwh) in [("2025-05", 132.4), ("2025-06", 151.9), ("2025-07", 160.2)] {
            sqlx::query("INSERT INTO consumption (period, kwh) VALUES ($1, $2)")
                .bind(period)
                .bind(kwh)
                .execute(self.storage.get_pool())
                .await
                .unwrap();
        }
    }
}
