//! The bounty/claim state machine. Status is stored on both records rather
//! than derived, so every transition here mutates the pair together and the
//! handlers persist both collections under their locks.
//!
//! ```text
//! claim:    bounty open -> claimed,                claim created active
//! submit:   claim active -> submitted,             bounty claimed|under_review -> under_review
//! approve:  claim submitted -> approved,           bounty under_review -> completed
//! reject:   claim submitted -> rejected,           bounty under_review -> open
//! ```

use time::OffsetDateTime;

use super::repo::{Claim, ClaimStatus};
use crate::bounties::repo::{Bounty, BountyStatus};
use crate::error::{ApiError, ApiResult};

/// Marks an open bounty as claimed. The caller creates the matching claim
/// record via [`new_claim`].
pub fn claim(bounty: &mut Bounty) -> ApiResult<()> {
    if bounty.status != BountyStatus::Open {
        return Err(ApiError::InvalidState("Bounty is not open".into()));
    }
    bounty.status = BountyStatus::Claimed;
    Ok(())
}

pub fn new_claim(id: u64, bounty_id: u64, hunter_id: u64) -> Claim {
    Claim {
        id,
        bounty_id,
        hunter_id,
        status: ClaimStatus::Active,
        claimed_at: OffsetDateTime::now_utc(),
        proof_description: None,
        proof_url: None,
        submitted_at: None,
        completed_at: None,
    }
}

pub fn submit(
    bounty: &mut Bounty,
    claim: &mut Claim,
    proof_description: Option<String>,
    proof_url: Option<String>,
) -> ApiResult<()> {
    if claim.status != ClaimStatus::Active {
        return Err(ApiError::InvalidState("Claim is not active".into()));
    }
    if !matches!(
        bounty.status,
        BountyStatus::Claimed | BountyStatus::UnderReview
    ) {
        return Err(ApiError::InvalidState("Bounty is not awaiting proof".into()));
    }
    claim.status = ClaimStatus::Submitted;
    claim.proof_description = proof_description;
    claim.proof_url = proof_url;
    claim.submitted_at = Some(OffsetDateTime::now_utc());
    bounty.status = BountyStatus::UnderReview;
    Ok(())
}

/// Approval completes the bounty; rejection reopens it. The rejected claim is
/// left in place and nothing stops the same hunter claiming again.
pub fn review(bounty: &mut Bounty, claim: &mut Claim, approved: bool) -> ApiResult<()> {
    if claim.status != ClaimStatus::Submitted || bounty.status != BountyStatus::UnderReview {
        return Err(ApiError::InvalidState("Claim is not under review".into()));
    }
    if approved {
        claim.status = ClaimStatus::Approved;
        claim.completed_at = Some(OffsetDateTime::now_utc());
        bounty.status = BountyStatus::Completed;
    } else {
        claim.status = ClaimStatus::Rejected;
        bounty.status = BountyStatus::Open;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounty(status: BountyStatus) -> Bounty {
        Bounty {
            id: 1,
            creator_id: 1,
            title: "Fix fence".into(),
            description: "…".into(),
            reward: 50.0,
            location: None,
            status,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn claim_moves_open_to_claimed() {
        let mut b = bounty(BountyStatus::Open);
        claim(&mut b).unwrap();
        assert_eq!(b.status, BountyStatus::Claimed);
    }

    #[test]
    fn claim_rejects_every_non_open_status() {
        for status in [
            BountyStatus::Claimed,
            BountyStatus::UnderReview,
            BountyStatus::Completed,
        ] {
            let mut b = bounty(status);
            let err = claim(&mut b).unwrap_err();
            assert!(matches!(err, ApiError::InvalidState(_)));
            assert_eq!(b.status, status, "no mutation on failure");
        }
    }

    #[test]
    fn new_claim_starts_active_without_proof() {
        let c = new_claim(1, 1, 2);
        assert_eq!(c.status, ClaimStatus::Active);
        assert!(c.proof_description.is_none());
        assert!(c.submitted_at.is_none());
        assert!(c.completed_at.is_none());
    }

    #[test]
    fn submit_moves_pair_to_under_review() {
        let mut b = bounty(BountyStatus::Claimed);
        let mut c = new_claim(1, 1, 2);
        submit(&mut b, &mut c, Some("did it".into()), Some("https://p".into())).unwrap();
        assert_eq!(b.status, BountyStatus::UnderReview);
        assert_eq!(c.status, ClaimStatus::Submitted);
        assert_eq!(c.proof_description.as_deref(), Some("did it"));
        assert!(c.submitted_at.is_some());
    }

    #[test]
    fn submit_allowed_while_already_under_review() {
        // a second active claim cannot exist in practice, but the table
        // permits claimed|under_review as the bounty precondition
        let mut b = bounty(BountyStatus::UnderReview);
        let mut c = new_claim(1, 1, 2);
        submit(&mut b, &mut c, None, None).unwrap();
        assert_eq!(b.status, BountyStatus::UnderReview);
    }

    #[test]
    fn submit_rejects_non_active_claim() {
        let mut b = bounty(BountyStatus::UnderReview);
        let mut c = new_claim(1, 1, 2);
        c.status = ClaimStatus::Submitted;
        let err = submit(&mut b, &mut c, None, None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
    }

    #[test]
    fn submit_rejects_open_or_completed_bounty() {
        for status in [BountyStatus::Open, BountyStatus::Completed] {
            let mut b = bounty(status);
            let mut c = new_claim(1, 1, 2);
            let err = submit(&mut b, &mut c, None, None).unwrap_err();
            assert!(matches!(err, ApiError::InvalidState(_)));
            assert_eq!(c.status, ClaimStatus::Active, "no mutation on failure");
        }
    }

    #[test]
    fn approve_completes_bounty_and_claim() {
        let mut b = bounty(BountyStatus::Claimed);
        let mut c = new_claim(1, 1, 2);
        submit(&mut b, &mut c, None, None).unwrap();
        review(&mut b, &mut c, true).unwrap();
        assert_eq!(b.status, BountyStatus::Completed);
        assert_eq!(c.status, ClaimStatus::Approved);
        assert!(c.completed_at.is_some());
    }

    #[test]
    fn reject_reopens_bounty_and_keeps_claim() {
        let mut b = bounty(BountyStatus::Claimed);
        let mut c = new_claim(1, 1, 2);
        submit(&mut b, &mut c, None, None).unwrap();
        review(&mut b, &mut c, false).unwrap();
        assert_eq!(b.status, BountyStatus::Open);
        assert_eq!(c.status, ClaimStatus::Rejected);
        assert!(c.completed_at.is_none());

        // the reopened bounty is claimable again
        claim(&mut b).unwrap();
        assert_eq!(b.status, BountyStatus::Claimed);
    }

    #[test]
    fn review_requires_a_submitted_claim() {
        let mut b = bounty(BountyStatus::UnderReview);
        let mut c = new_claim(1, 1, 2);
        let err = review(&mut b, &mut c, true).unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
    }

    #[test]
    fn review_cannot_run_twice() {
        let mut b = bounty(BountyStatus::Claimed);
        let mut c = new_claim(1, 1, 2);
        submit(&mut b, &mut c, None, None).unwrap();
        review(&mut b, &mut c, true).unwrap();
        let err = review(&mut b, &mut c, true).unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
    }
}
