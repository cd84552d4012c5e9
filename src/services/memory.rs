use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    error::AppError,
    models::trip::{next_trip_id, StoredTrip, TripId, TripRecord, TripStatus},
    services::trip_store::TripStore,
};

#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: Mutex<Vec<StoredTrip>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn add_trip(&self, trip: &TripRecord, status: &TripStatus) -> Result<TripId, AppError> {
        let mut trips = self.trips.lock().await;
        let id = next_trip_id(trips.iter().map(|t| &t.id));
        trips.push(StoredTrip::new(id.clone(), status.clone(), trip.clone()));
        debug!(%id, %status, "trip stored in memory");
        Ok(id)
    }

    async fn get_trip(&self, id: &TripId) -> Result<Option<StoredTrip>, AppError> {
        let trips = self.trips.lock().await;
        Ok(trips.iter().find(|t| &t.id == id).cloned())
    }

    async fn list_trips(&self, status: Option<&TripStatus>) -> Result<Vec<StoredTrip>, AppError> {
        let trips = self.trips.lock().await;
        Ok(trips
            .iter()
            .filter(|t| status.map_or(true, |s| &t.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &TripId,
        status: &TripStatus,
    ) -> Result<StoredTrip, AppError> {
        let mut trips = self.trips.lock().await;
        let stored = trips
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        stored.status = status.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}
