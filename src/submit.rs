use std::io::Write;

use tracing::debug;

use crate::{
    error::AppError,
    models::trip::{TripId, TripRecord, TripStatus},
    services::trip_store::TripStore,
};

pub fn confirmation_message(id: &TripId) -> String {
    format!("旅行计划已创建，ID: {id}")
}

/// Hands `trip` to the store once and reports the issued id on `out`.
///
/// Nothing is validated here and store errors come back untouched; on error
/// nothing is written.
pub async fn submit_trip<S, W>(
    store: &S,
    trip: &TripRecord,
    status: &TripStatus,
    out: &mut W,
) -> Result<TripId, AppError>
where
    S: TripStore + ?Sized,
    W: Write,
{
    debug!(
        city = %trip.destination.city,
        departure = %trip.departure_date,
        span_days = trip.span_days(),
        duration_days = trip.duration_days,
        %status,
        "submitting trip"
    );
    let id = store.add_trip(trip, status).await?;
    writeln!(out, "{}", confirmation_message(&id))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::{models::trip::StoredTrip, test_support::sample_trip};

    /// Records every insertion and answers with a fixed id, or fails.
    struct ScriptedStore {
        reply: Option<TripId>,
        calls: Mutex<Vec<(TripRecord, TripStatus)>>,
    }

    impl ScriptedStore {
        fn returning(id: &str) -> Self {
            Self {
                reply: Some(TripId::new(id)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TripStore for ScriptedStore {
        async fn add_trip(
            &self,
            trip: &TripRecord,
            status: &TripStatus,
        ) -> Result<TripId, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((trip.clone(), status.clone()));
            self.reply
                .clone()
                .ok_or_else(|| AppError::Other(anyhow!("storage unavailable")))
        }

        async fn get_trip(&self, _id: &TripId) -> Result<Option<StoredTrip>, AppError> {
            Ok(None)
        }

        async fn list_trips(
            &self,
            _status: Option<&TripStatus>,
        ) -> Result<Vec<StoredTrip>, AppError> {
            Ok(Vec::new())
        }

        async fn update_status(
            &self,
            id: &TripId,
            _status: &TripStatus,
        ) -> Result<StoredTrip, AppError> {
            Err(AppError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn reports_the_id_the_store_returned() {
        let store = ScriptedStore::returning("trip_042");
        let trip = sample_trip();
        let mut out = Vec::new();

        let id = submit_trip(&store, &trip, &TripStatus::current(), &mut out)
            .await
            .unwrap();

        assert_eq!(id.as_str(), "trip_042");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "旅行计划已创建，ID: trip_042\n"
        );

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, trip);
        assert_eq!(calls[0].1.as_str(), "current");
    }

    #[tokio::test]
    async fn store_failure_propagates_without_output() {
        let store = ScriptedStore::failing();
        let mut out = Vec::new();

        let err = submit_trip(&store, &sample_trip(), &TripStatus::past(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(&err, AppError::Other(cause) if cause.to_string() == "storage unavailable"));
        assert!(out.is_empty());
        assert_eq!(store.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn passes_record_through_unvalidated() {
        let store = ScriptedStore::returning("trip_x");
        let mut trip = sample_trip();
        trip.duration_days = 30;
        trip.return_date = trip.departure_date.pred_opt().unwrap();
        let mut out = Vec::new();

        submit_trip(&store, &trip, &"".into(), &mut out).await.unwrap();

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls[0].0, trip);
        assert_eq!(calls[0].1.as_str(), "");
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let store: Box<dyn TripStore> = Box::new(ScriptedStore::returning("trip_001"));
        let mut out = Vec::new();
        let id = submit_trip(store.as_ref(), &sample_trip(), &TripStatus::planned(), &mut out)
            .await
            .unwrap();
        assert_eq!(confirmation_message(&id), "旅行计划已创建，ID: trip_001");
    }
}
