use std::collections::HashMap;
use std::sync::RwLock;

use axum::async_trait;
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};

use crate::auth::repo::User;

/// Bearer-token session table. Values are user snapshots taken at login, not
/// live references; a profile change after login is invisible to the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, token: String, user: User);
    async fn get(&self, token: &str) -> Option<User>;
    async fn delete(&self, token: &str);
}

/// Process-lifetime sessions: no expiry, lost on restart.
#[derive(Default)]
pub struct InMemorySessions {
    tokens: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn put(&self, token: String, user: User) {
        let mut tokens = self.tokens.write().expect("session map poisoned");
        tokens.insert(token, user);
    }

    async fn get(&self, token: &str) -> Option<User> {
        let tokens = self.tokens.read().expect("session map poisoned");
        tokens.get(token).cloned()
    }

    async fn delete(&self, token: &str) {
        let mut tokens = self.tokens.write().expect("session map poisoned");
        tokens.remove(token);
    }
}

/// 256 bits from the OS RNG, base64url without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Base64UrlUnpadded::encode_string(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user(id: u64) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password_hash: "hash".into(),
            full_name: None,
            location: None,
            age: None,
            weight: None,
            activity_types: Vec::new(),
            payment_info: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn tokens_are_long_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 43); // 32 bytes base64url, no padding
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn put_get_delete() {
        let sessions = InMemorySessions::default();
        let token = generate_token();
        sessions.put(token.clone(), user(1)).await;
        assert_eq!(sessions.get(&token).await.unwrap().id, 1);
        sessions.delete(&token).await;
        assert!(sessions.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn get_of_unknown_token_is_none() {
        let sessions = InMemorySessions::default();
        assert!(sessions.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn session_holds_a_snapshot() {
        let sessions = InMemorySessions::default();
        let mut u = user(2);
        sessions.put("t".into(), u.clone()).await;
        u.email = "changed@example.com".into();
        assert_eq!(sessions.get("t").await.unwrap().email, "user2@example.com");
    }
}
