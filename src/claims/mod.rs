use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod lifecycle;
pub mod proofs;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::claim_routes()
}
