use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser,
    error::ApiResult,
    repo::{next_id, Collection},
    state::AppState,
    workouts::{
        dto::{CreateRecurringRequest, LogWorkoutRequest, Suggestion},
        repo::{RecurringWorkout, Workout},
    },
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(log_workout))
        .route("/workouts/history", get(history))
        .route("/workouts/recurring", post(create_recurring).get(list_recurring))
        .route("/workouts/suggestions", get(suggestions))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.id))]
pub async fn log_workout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<LogWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    let _workouts_lock = state.collections.lock(Collection::Workouts).await;
    let mut workouts: Vec<Workout> = state.collections.load(Collection::Workouts).await?;

    let workout = Workout {
        id: next_id(&workouts),
        user_id: user.0.id,
        title: payload.title,
        kind: payload.kind,
        duration: payload.duration,
        data: payload.data,
        timestamp: OffsetDateTime::now_utc(),
    };
    workouts.push(workout.clone());
    state.collections.store(Collection::Workouts, &workouts).await?;

    info!(workout_id = workout.id, "workout logged");
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Workout>>> {
    let mut workouts: Vec<Workout> = state.collections.load(Collection::Workouts).await?;
    workouts.retain(|w| w.user_id == user.0.id);
    Ok(Json(workouts))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.id))]
pub async fn create_recurring(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateRecurringRequest>,
) -> ApiResult<(StatusCode, Json<RecurringWorkout>)> {
    let _recurring_lock = state.collections.lock(Collection::RecurringWorkouts).await;
    let mut recurring: Vec<RecurringWorkout> =
        state.collections.load(Collection::RecurringWorkouts).await?;

    let item = RecurringWorkout {
        id: next_id(&recurring),
        user_id: user.0.id,
        title: payload.title,
        schedule: payload.schedule,
        created_at: OffsetDateTime::now_utc(),
    };
    recurring.push(item.clone());
    state
        .collections
        .store(Collection::RecurringWorkouts, &recurring)
        .await?;

    info!(recurring_id = item.id, "recurring workout created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn list_recurring(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<RecurringWorkout>>> {
    let mut recurring: Vec<RecurringWorkout> =
        state.collections.load(Collection::RecurringWorkouts).await?;
    recurring.retain(|r| r.user_id == user.0.id);
    Ok(Json(recurring))
}

const SUGGESTIONS: [Suggestion; 3] = [
    Suggestion {
        id: 1,
        title: "Morning Run",
        kind: "individual",
        duration: "30 mins",
    },
    Suggestion {
        id: 2,
        title: "Gym Session",
        kind: "gym",
        duration: "60 mins",
    },
    Suggestion {
        id: 3,
        title: "Yoga Class",
        kind: "group",
        duration: "45 mins",
    },
];

#[instrument(skip(user), fields(user_id = user.0.id))]
pub async fn suggestions(user: CurrentUser) -> Json<Vec<Suggestion>> {
    let mut items = SUGGESTIONS.to_vec();
    if !user.0.activity_types.is_empty() {
        items.retain(|s| user.0.activity_types.iter().any(|t| t == s.kind));
    }
    Json(items)
}
