use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser,
    bounties::repo as bounty_repo,
    bounties::repo::Bounty,
    claims::{
        dto::{ProofUploadResponse, ReviewRequest, ReviewResponse, SubmitProofRequest},
        lifecycle, proofs,
        repo::{self, Claim},
    },
    error::{ApiError, ApiResult},
    repo::{next_id, Collection},
    state::AppState,
};

pub fn claim_routes() -> Router<AppState> {
    Router::new()
        .route("/bounties/:id/claim", post(claim_bounty))
        .route("/claims/my", get(my_claims))
        .route("/claims/:id/submit", post(submit_proof))
        .route("/claims/:id/review", post(review_claim))
        .route("/claims/:id/proof", post(upload_proof))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn claim_bounty(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(bounty_id): Path<u64>,
) -> ApiResult<(StatusCode, Json<Claim>)> {
    let _bounties_lock = state.collections.lock(Collection::Bounties).await;
    let _claims_lock = state.collections.lock(Collection::Claims).await;

    let mut bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;
    let bounty = bounty_repo::find_mut(&mut bounties, bounty_id)
        .ok_or_else(|| ApiError::NotFound("Bounty not found".into()))?;
    lifecycle::claim(bounty)?;

    let mut claims: Vec<Claim> = state.collections.load(Collection::Claims).await?;
    let claim = lifecycle::new_claim(next_id(&claims), bounty_id, user.0.id);
    claims.push(claim.clone());

    state.collections.store(Collection::Bounties, &bounties).await?;
    state.collections.store(Collection::Claims, &claims).await?;

    info!(claim_id = claim.id, bounty_id, "bounty claimed");
    Ok((StatusCode::CREATED, Json(claim)))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.id))]
pub async fn submit_proof(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(claim_id): Path<u64>,
    Json(payload): Json<SubmitProofRequest>,
) -> ApiResult<Json<Claim>> {
    let _bounties_lock = state.collections.lock(Collection::Bounties).await;
    let _claims_lock = state.collections.lock(Collection::Claims).await;

    let mut claims: Vec<Claim> = state.collections.load(Collection::Claims).await?;
    let claim = repo::find_mut(&mut claims, claim_id)
        .ok_or_else(|| ApiError::NotFound("Claim not found".into()))?;
    if claim.hunter_id != user.0.id {
        return Err(ApiError::Forbidden(
            "Only the claiming hunter can submit proof".into(),
        ));
    }

    let mut bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;
    let bounty = bounty_repo::find_mut(&mut bounties, claim.bounty_id)
        .ok_or_else(|| ApiError::NotFound("Bounty not found".into()))?;

    lifecycle::submit(bounty, claim, payload.proof_description, payload.proof_url)?;
    let updated = claim.clone();

    state.collections.store(Collection::Bounties, &bounties).await?;
    state.collections.store(Collection::Claims, &claims).await?;

    info!(claim_id, bounty_id = updated.bounty_id, "proof submitted");
    Ok(Json(updated))
}

#[instrument(skip(state, user, payload), fields(user_id = user.0.id))]
pub async fn review_claim(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(claim_id): Path<u64>,
    Json(payload): Json<ReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let _bounties_lock = state.collections.lock(Collection::Bounties).await;
    let _claims_lock = state.collections.lock(Collection::Claims).await;

    let mut claims: Vec<Claim> = state.collections.load(Collection::Claims).await?;
    let claim = repo::find_mut(&mut claims, claim_id)
        .ok_or_else(|| ApiError::NotFound("Claim not found".into()))?;

    let mut bounties: Vec<Bounty> = state.collections.load(Collection::Bounties).await?;
    let bounty = bounty_repo::find_mut(&mut bounties, claim.bounty_id)
        .ok_or_else(|| ApiError::NotFound("Bounty not found".into()))?;
    if bounty.creator_id != user.0.id {
        return Err(ApiError::Forbidden(
            "Only the bounty creator can review claims".into(),
        ));
    }

    lifecycle::review(bounty, claim, payload.approved)?;

    state.collections.store(Collection::Bounties, &bounties).await?;
    state.collections.store(Collection::Claims, &claims).await?;

    let message = if payload.approved {
        "Claim approved, bounty completed".to_string()
    } else {
        "Claim rejected, bounty reopened".to_string()
    };
    info!(claim_id, approved = payload.approved, "claim reviewed");
    Ok(Json(ReviewResponse {
        message,
        approved: payload.approved,
    }))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn my_claims(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Claim>>> {
    let mut claims: Vec<Claim> = state.collections.load(Collection::Claims).await?;
    claims.retain(|c| c.hunter_id == user.0.id);
    Ok(Json(claims))
}

/// Multipart upload of a proof attachment (`file` field). The attachment is
/// stored under `proofs/{user_id}/{bounty_id}/{filename}` and its public URL
/// is returned; pass it to submit as `proof_url`.
#[instrument(skip(state, user, multipart), fields(user_id = user.0.id))]
pub async fn upload_proof(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(claim_id): Path<u64>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProofUploadResponse>> {
    let claims: Vec<Claim> = state.collections.load(Collection::Claims).await?;
    let claim = claims
        .iter()
        .find(|c| c.id == claim_id)
        .ok_or_else(|| ApiError::NotFound("Claim not found".into()))?;
    if claim.hunter_id != user.0.id {
        return Err(ApiError::Forbidden(
            "Only the claiming hunter can upload proof".into(),
        ));
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("file must have a filename".into()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "image/jpeg".into());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let proof_url = proofs::store_proof(
            &state,
            user.0.id,
            claim.bounty_id,
            &filename,
            data,
            &content_type,
        )
        .await?;
        info!(claim_id, %proof_url, "proof uploaded");
        return Ok(Json(ProofUploadResponse { proof_url }));
    }

    Err(ApiError::BadRequest("file field is required".into()))
}
