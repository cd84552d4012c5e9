use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "trip_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub destination: Destination,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub duration_days: u32,
    pub budget: Budget,
    pub purpose: String,
    pub travelers: u32,
    pub climate: String,
    pub activities: Vec<String>,
    pub accommodation: Accommodation,
    pub notes: String,
}

impl TripRecord {
    /// Inclusive day count between departure and return. Informational only,
    /// `duration_days` is never checked against it.
    pub fn span_days(&self) -> i64 {
        (self.return_date - self.departure_date).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub city: String,
    pub country: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
}

/// Free-text lifecycle label attached to a trip at insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripStatus(String);

impl TripStatus {
    pub const CURRENT: &'static str = "current";
    pub const PAST: &'static str = "past";
    pub const PLANNED: &'static str = "planned";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn current() -> Self {
        Self::new(Self::CURRENT)
    }

    pub fn past() -> Self {
        Self::new(Self::PAST)
    }

    pub fn planned() -> Self {
        Self::new(Self::PLANNED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TripStatus {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TripStatus {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier issued by a trip store. Treat as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_sequence(seq: i64) -> Self {
        Self(format!("{ID_PREFIX}{seq:03}"))
    }

    /// Sequence number of ids issued by the bundled stores, `None` for
    /// anything else.
    pub fn sequence(&self) -> Option<i64> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrip {
    pub id: TripId,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub trip: TripRecord,
}

impl StoredTrip {
    pub fn new(id: TripId, status: TripStatus, trip: TripRecord) -> Self {
        let now = Utc::now();
        Self {
            id,
            status,
            created_at: now,
            updated_at: now,
            trip,
        }
    }
}

/// Next id after the highest sequence already issued.
pub fn next_trip_id<'a>(existing: impl IntoIterator<Item = &'a TripId>) -> TripId {
    let last = existing
        .into_iter()
        .filter_map(TripId::sequence)
        .max()
        .unwrap_or(0);
    TripId::from_sequence(last + 1)
}
