use serde::{Deserialize, Serialize};

/// Request body for logging a workout.
#[derive(Debug, Default, Deserialize)]
pub struct LogWorkoutRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Request body for a recurring-workout definition.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecurringRequest {
    pub title: Option<String>,
    pub schedule: Option<String>,
}

/// A canned workout suggestion, filtered by the caller's activity types.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub id: u64,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub duration: &'static str,
}
