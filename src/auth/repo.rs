use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::repo::Record;

/// User record as persisted in the `users` collection blob. The hash stays in
/// the blob (the blob is the database); API responses go through
/// [`super::dto::PublicUser`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub activity_types: Vec<String>,
    pub payment_info: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }
}

pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    users.iter().find(|u| u.username == username)
}

/// Usernames compare byte-exact; emails are stored lowercased, so the caller
/// must lowercase before calling.
pub fn is_taken(users: &[User], username: &str, email: &str) -> bool {
    users
        .iter()
        .any(|u| u.username == username || u.email == email)
}
