use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    db::DbPool,
    error::AppError,
    models::trip::{StoredTrip, TripId, TripRecord, TripStatus},
    services::trip_store::TripStore,
};

const SELECT_COLUMNS: &str = "SELECT id, status, payload, created_at, updated_at FROM trips";

/// Trips in the `trips` table; the record itself is kept as a JSON payload.
#[derive(Clone)]
pub struct SqliteTripStore {
    db: DbPool,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteTripStore {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

fn row_to_trip(row: &SqliteRow) -> Result<StoredTrip, AppError> {
    let payload: String = row.try_get("payload")?;
    let trip: TripRecord = serde_json::from_str(&payload)?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(StoredTrip {
        id: TripId::new(row.try_get::<String, _>("id")?),
        status: TripStatus::new(row.try_get::<String, _>("status")?),
        created_at,
        updated_at,
        trip,
    })
}

#[async_trait]
impl TripStore for SqliteTripStore {
    async fn add_trip(&self, trip: &TripRecord, status: &TripStatus) -> Result<TripId, AppError> {
        let payload = serde_json::to_string(trip)?;
        let now = Utc::now();

        let _guard = self.write_lock.lock().await;
        // Sequence and id are derived inside the insert itself, so the write
        // lock is taken before `MAX(seq)` is read.
        let id: String = sqlx::query_scalar(
            "INSERT INTO trips (seq, id, status, payload, created_at, updated_at) \
             SELECT next.seq, printf('trip_%03d', next.seq), ?1, ?2, ?3, ?3 \
             FROM (SELECT COALESCE(MAX(seq), 0) + 1 AS seq FROM trips) AS next \
             RETURNING id",
        )
        .bind(status.as_str())
        .bind(payload)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        let id = TripId::new(id);

        info!(%id, %status, "trip inserted");
        Ok(id)
    }

    async fn get_trip(&self, id: &TripId) -> Result<Option<StoredTrip>, AppError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id.as_str())
            .fetch_optional(&self.db)
            .await?;
        row.as_ref().map(row_to_trip).transpose()
    }

    async fn list_trips(&self, status: Option<&TripStatus>) -> Result<Vec<StoredTrip>, AppError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!("{SELECT_COLUMNS} WHERE status = ?1 ORDER BY seq"))
                    .bind(status.as_str())
                    .fetch_all(&self.db)
                    .await?
            }
            None => {
                sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY seq"))
                    .fetch_all(&self.db)
                    .await?
            }
        };
        rows.iter().map(row_to_trip).collect()
    }

    async fn update_status(
        &self,
        id: &TripId,
        status: &TripStatus,
    ) -> Result<StoredTrip, AppError> {
        let result = sqlx::query("UPDATE trips SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id.as_str())
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }
        debug!(%id, %status, "trip status updated");
        self.get_trip(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}
