use async_trait::async_trait;

use crate::{
    error::AppError,
    models::trip::{StoredTrip, TripId, TripRecord, TripStatus},
};

/// Persistence boundary for trips. Implementations own identifier assignment
/// and every piece of stored state.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persists `trip` under `status` and returns the identifier it was stored as.
    async fn add_trip(&self, trip: &TripRecord, status: &TripStatus) -> Result<TripId, AppError>;

    async fn get_trip(&self, id: &TripId) -> Result<Option<StoredTrip>, AppError>;

    /// All stored trips in insertion order, optionally only those with `status`.
    async fn list_trips(&self, status: Option<&TripStatus>) -> Result<Vec<StoredTrip>, AppError>;

    async fn update_status(&self, id: &TripId, status: &TripStatus)
        -> Result<StoredTrip, AppError>;
}
