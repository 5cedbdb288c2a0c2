use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser,
    bounties::{
        dto::{BountyFilter, CreateBountyRequest},
        repo::{self, Bounty, BountyStatus},
    },
    error::{ApiError, ApiResult},
    repo::{next_id, Collection},
    state::AppState,
};

pub fn bounty_routes() -> Router<AppState> {
    Router::new()
        .route("/bounties", post(create_bounty).get(list_bounties))
        .route("/bounties/:id", get(get_bounty))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.id))]
pub async fn create_bounty(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateBountyRequest>,
) -> ApiResult<(StatusCode, Json<Bounty>)> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }

    let _bounties_lock = state.collections.lock(Collection::Bounties).await;
    let mut bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;

    let bounty = Bounty {
        id: next_id(&bounties),
        creator_id: user.0.id,
        title: payload.title,
        description: payload.description,
        reward: payload.reward,
        location: payload.location,
        status: BountyStatus::Open,
        created_at: OffsetDateTime::now_utc(),
    };
    bounties.push(bounty.clone());
    state.collections.store(Collection::Bounties, &bounties).await?;

    info!(bounty_id = bounty.id, "bounty created");
    Ok((StatusCode::CREATED, Json(bounty)))
}

#[instrument(skip(state))]
pub async fn list_bounties(
    State(state): State<AppState>,
    Query(filter): Query<BountyFilter>,
) -> ApiResult<Json<Vec<Bounty>>> {
    let mut bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;
    if let Some(status) = filter.status {
        bounties.retain(|b| b.status == status);
    }
    Ok(Json(bounties))
}

#[instrument(skip(state))]
pub async fn get_bounty(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Bounty>> {
    let bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;
    match repo::find(&bounties, id) {
        Some(bounty) => Ok(Json(bounty.clone())),
        None => Err(ApiError::NotFound("Bounty not found".into())),
    }
}
