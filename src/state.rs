use std::sync::Arc;

use crate::config::AppConfig;
use crate::repo::CollectionStore;
use crate::sessions::{InMemorySessions, SessionStore};
use crate::storage::{BlobStore, MemoryBlobStore, S3Storage};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub collections: CollectionStore,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let blobs = Arc::new(S3Storage::new(&config.s3).await?) as Arc<dyn BlobStore>;
        Ok(Self {
            config,
            collections: CollectionStore::new(blobs),
            sessions: Arc::new(InMemorySessions::default()),
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        blobs: Arc<dyn BlobStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            collections: CollectionStore::new(blobs),
            sessions,
        }
    }

    /// State backed entirely by in-memory stores, for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            s3: crate::config::S3Config {
                bucket: "test-bucket".into(),
                region: "us-east-1".into(),
                endpoint: None,
                access_key: None,
                secret_key: None,
            },
        });
        Self::from_parts(
            config,
            Arc::new(MemoryBlobStore::default()),
            Arc::new(InMemorySessions::default()),
        )
    }
}
