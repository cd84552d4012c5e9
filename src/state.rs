use std::sync::Arc;

use tracing::info;

use crate::{
    config::{AppConfig, StoreBackend},
    db::{init_pool, run_migrations},
    error::AppError,
    services::{
        memory::MemoryTripStore, sqlite::SqliteTripStore, storage::JsonTripStore,
        trip_store::TripStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn TripStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn TripStore>) -> Self {
        Self { config, store }
    }

    /// Opens the store backend selected in `config`.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn TripStore> = match config.backend {
            StoreBackend::Json => {
                let store = JsonTripStore::new(config.trips_root.clone());
                store.ensure_structure().await?;
                Arc::new(store)
            }
            StoreBackend::Sqlite => {
                let db = init_pool(&config.database_url).await?;
                run_migrations(&db).await?;
                Arc::new(SqliteTripStore::new(db))
            }
            StoreBackend::Memory => Arc::new(MemoryTripStore::new()),
        };
        info!(backend = %config.backend, "trip store ready");
        Ok(Self::new(config, store))
    }
}
