use anyhow::Context;
use bytes::Bytes;

use crate::state::AppState;
use crate::storage::BlobStore;

/// Uploads one proof attachment and returns its public URL. Attachments live
/// in their own key space, outside the collection blobs.
pub async fn store_proof(
    state: &AppState,
    user_id: u64,
    bounty_id: u64,
    filename: &str,
    body: Bytes,
    content_type: &str,
) -> anyhow::Result<String> {
    let key = format!("proofs/{}/{}/{}", user_id, bounty_id, filename);
    state
        .collections
        .blobs()
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("upload proof {}", key))?;
    Ok(state.collections.blobs().public_url(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn proof_key_carries_user_and_bounty() {
        let state = AppState::fake();
        let url = store_proof(
            &state,
            2,
            1,
            "fence.jpg",
            Bytes::from_static(b"jpeg bytes"),
            "image/jpeg",
        )
        .await
        .unwrap();
        assert!(url.ends_with("proofs/2/1/fence.jpg"));

        let stored = state
            .collections
            .blobs()
            .get_object("proofs/2/1/fence.jpg")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&stored[..], b"jpeg bytes");
    }
}
