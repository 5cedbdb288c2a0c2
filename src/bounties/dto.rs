use serde::Deserialize;

use super::repo::BountyStatus;

/// Request body for posting a bounty.
#[derive(Debug, Deserialize)]
pub struct CreateBountyRequest {
    pub title: String,
    pub description: String,
    pub reward: f64,
    pub location: Option<String>,
}

/// Optional `?status=` filter for the bounty list.
#[derive(Debug, Default, Deserialize)]
pub struct BountyFilter {
    pub status: Option<BountyStatus>,
}
