use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::trip::{next_trip_id, StoredTrip, TripId, TripRecord, TripStatus},
    services::trip_store::TripStore,
};

const TRIPS_FILE: &str = "trips.json";
const TRIPS_TMP_FILE: &str = "trips.json.tmp";

/// Keeps every trip in one pretty-printed JSON array under `root`.
#[derive(Clone)]
pub struct JsonTripStore {
    root: Arc<PathBuf>,
    // Serializes read-modify-write cycles on the trips file.
    write_lock: Arc<Mutex<()>>,
}

impl JsonTripStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trips_path(&self) -> PathBuf {
        self.root().join(TRIPS_FILE)
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    async fn load_trips(&self) -> Result<Vec<StoredTrip>, AppError> {
        let path = self.trips_path();
        if !fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }
        let raw = fs::read(&path).await?;
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let trips: Vec<StoredTrip> = serde_json::from_slice(&raw)?;
        Ok(trips)
    }

    async fn save_trips(&self, trips: &[StoredTrip]) -> Result<(), AppError> {
        self.ensure_structure().await?;
        let data = serde_json::to_vec_pretty(trips)?;
        // Readers must only ever see a complete file: write aside, then swap.
        let tmp = self.root().join(TRIPS_TMP_FILE);
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, self.trips_path()).await?;
        Ok(())
    }
}

#[async_trait]
impl TripStore for JsonTripStore {
    async fn add_trip(&self, trip: &TripRecord, status: &TripStatus) -> Result<TripId, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut trips = self.load_trips().await?;
        let id = next_trip_id(trips.iter().map(|t| &t.id));
        trips.push(StoredTrip::new(id.clone(), status.clone(), trip.clone()));
        self.save_trips(&trips).await?;
        info!(%id, %status, path = %self.trips_path().display(), "trip saved");
        Ok(id)
    }

    async fn get_trip(&self, id: &TripId) -> Result<Option<StoredTrip>, AppError> {
        let trips = self.load_trips().await?;
        Ok(trips.into_iter().find(|t| &t.id == id))
    }

    async fn list_trips(&self, status: Option<&TripStatus>) -> Result<Vec<StoredTrip>, AppError> {
        let mut trips = self.load_trips().await?;
        if let Some(status) = status {
            trips.retain(|t| &t.status == status);
        }
        Ok(trips)
    }

    async fn update_status(
        &self,
        id: &TripId,
        status: &TripStatus,
    ) -> Result<StoredTrip, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut trips = self.load_trips().await?;
        let stored = trips
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        stored.status = status.clone();
        stored.updated_at = Utc::now();
        let updated = stored.clone();
        self.save_trips(&trips).await?;
        debug!(%id, %status, "trip status updated");
        Ok(updated)
    }
}
