use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::repo::Record;

/// One logged workout. Append-only; never transitions state. `data` carries
/// arbitrary client-shaped workout detail and is never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: u64,
    pub user_id: u64,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<String>,
    pub data: Option<serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Record for Workout {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A recurring-workout definition. `schedule` is free text ("daily",
/// "weekly"); nothing in this service triggers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringWorkout {
    pub id: u64,
    pub user_id: u64,
    pub title: Option<String>,
    pub schedule: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Record for RecurringWorkout {
    fn id(&self) -> u64 {
        self.id
    }
}
