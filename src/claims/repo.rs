use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::repo::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Active,
    Submitted,
    Approved,
    Rejected,
}

/// A hunter's pursuit of a bounty. Rejected claims are kept forever, so a
/// bounty's full claim history stays reconstructable from this collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: u64,
    pub bounty_id: u64,
    pub hunter_id: u64,
    pub status: ClaimStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub claimed_at: OffsetDateTime,
    pub proof_description: Option<String>,
    pub proof_url: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub submitted_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub completed_at: Option<OffsetDateTime>,
}

impl Record for Claim {
    fn id(&self) -> u64 {
        self.id
    }
}

pub fn find_mut(claims: &mut [Claim], id: u64) -> Option<&mut Claim> {
    claims.iter_mut().find(|c| c.id == id)
}
