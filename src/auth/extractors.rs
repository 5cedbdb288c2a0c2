use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::repo::User;
use crate::error::ApiError;
use crate::sessions::SessionStore;
use crate::state::AppState;

/// Resolves the bearer token against the session table, yielding the user
/// snapshot taken at login.
#[derive(Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user = state
            .sessions
            .get(token)
            .await
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}
