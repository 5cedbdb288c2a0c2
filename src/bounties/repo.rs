use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::repo::Record;

/// Bounty status half of the lifecycle pair; the other half lives on
/// [`crate::claims::repo::Claim`]. Transitions are applied by
/// [`crate::claims::lifecycle`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BountyStatus {
    Open,
    Claimed,
    UnderReview,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounty {
    pub id: u64,
    pub creator_id: u64,
    pub title: String,
    pub description: String,
    pub reward: f64,
    pub location: Option<String>,
    pub status: BountyStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Record for Bounty {
    fn id(&self) -> u64 {
        self.id
    }
}

pub fn find(bounties: &[Bounty], id: u64) -> Option<&Bounty> {
    bounties.iter().find(|b| b.id == id)
}

pub fn find_mut(bounties: &mut [Bounty], id: u64) -> Option<&mut Bounty> {
    bounties.iter_mut().find(|b| b.id == id)
}
