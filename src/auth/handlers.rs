use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        password::{hash_password, verify_password},
        repo::{self, User},
    },
    error::{ApiError, ApiResult},
    repo::{next_id, Collection},
    sessions::{generate_token, SessionStore},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    if username.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let _users_lock = state.collections.lock(Collection::Users).await;
    let mut users: Vec<User> = state.collections.load(Collection::Users).await?;

    if repo::is_taken(&users, &username, &email) {
        warn!(%username, "username or email already exists");
        return Err(ApiError::Conflict("Username or email already exists".into()));
    }

    let password_hash = hash_password(&payload.password).map_err(ApiError::Storage)?;
    let user = User {
        id: next_id(&users),
        username,
        email,
        password_hash,
        full_name: payload.full_name,
        location: payload.location,
        age: payload.age,
        weight: payload.weight,
        activity_types: payload.activity_types,
        payment_info: payload.payment_info,
        created_at: OffsetDateTime::now_utc(),
    };
    users.push(user.clone());
    state.collections.store(Collection::Users, &users).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Missing credentials".into()));
    }

    let users: Vec<User> = state.collections.load(Collection::Users).await?;
    let user = match repo::find_by_username(&users, &payload.username) {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized);
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(ApiError::Storage)?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    let token = generate_token();
    state.sessions.put(token.clone(), user.clone()).await;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
            location: None,
            age: None,
            weight: None,
            activity_types: Vec::new(),
            payment_info: None,
        }
    }

    async fn do_register(state: &AppState, username: &str, email: &str, pw: &str) -> ApiResult<PublicUser> {
        register(State(state.clone()), Json(register_req(username, email, pw)))
            .await
            .map(|(_, Json(u))| u)
    }

    #[test]
    fn email_regex_accepts_and_rejects() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("a@nodot"));
    }

    #[tokio::test]
    async fn register_assigns_sequential_ids() {
        let state = AppState::fake();
        let a = do_register(&state, "alice", "a@x.com", "pw1").await.unwrap();
        let b = do_register(&state, "bob", "b@x.com", "pw2").await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username_and_email() {
        let state = AppState::fake();
        do_register(&state, "alice", "a@x.com", "pw").await.unwrap();

        let err = do_register(&state, "alice", "other@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err = do_register(&state, "other", "a@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn case_policy_usernames_exact_emails_folded() {
        let state = AppState::fake();
        do_register(&state, "alice", "a@x.com", "pw").await.unwrap();

        // same email in different case collides
        let err = do_register(&state, "carol", "A@X.COM", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        // same username in different case is a distinct user
        let u = do_register(&state, "Alice", "alice2@x.com", "pw").await.unwrap();
        assert_eq!(u.username, "Alice");
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let state = AppState::fake();
        let err = do_register(&state, "", "a@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let err = do_register(&state, "alice", "a@x.com", "").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn login_issues_fresh_unique_tokens() {
        let state = AppState::fake();
        do_register(&state, "alice", "a@x.com", "pw1").await.unwrap();

        let req = || LoginRequest {
            username: "alice".into(),
            password: "pw1".into(),
        };
        let Json(first) = login(State(state.clone()), Json(req())).await.unwrap();
        let Json(second) = login(State(state.clone()), Json(req())).await.unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(first.user.id, 1);

        // both tokens resolve
        assert!(state.sessions.get(&first.token).await.is_some());
        assert!(state.sessions.get(&second.token).await.is_some());
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let state = AppState::fake();
        do_register(&state, "alice", "a@x.com", "pw1").await.unwrap();

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "nobody".into(),
                password: "pw1".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
