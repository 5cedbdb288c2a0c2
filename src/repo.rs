use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{ApiError, ApiResult};
use crate::storage::BlobStore;

const DATA_PREFIX: &str = "data/";
const COLLECTION_COUNT: usize = 5;

/// One persisted collection: a single JSON array blob holding every record of
/// the entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Bounties,
    Claims,
    Workouts,
    RecurringWorkouts,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Bounties => "bounties",
            Collection::Claims => "claims",
            Collection::Workouts => "workouts",
            Collection::RecurringWorkouts => "recurring_workouts",
        }
    }

    fn key(self) -> String {
        format!("{}{}.json", DATA_PREFIX, self.name())
    }

    fn index(self) -> usize {
        match self {
            Collection::Users => 0,
            Collection::Bounties => 1,
            Collection::Claims => 2,
            Collection::Workouts => 3,
            Collection::RecurringWorkouts => 4,
        }
    }
}

/// A record that lives in a [`Collection`].
pub trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> u64;
}

/// 1 for an empty collection, max(existing ids) + 1 otherwise. Ids are never
/// reused because records are never deleted.
pub fn next_id<T: Record>(items: &[T]) -> u64 {
    items.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

/// Typed access to the per-collection blobs. Every write replaces the whole
/// collection, so each collection carries a mutex and writers must hold it
/// across their full read-modify-write cycle. Operations touching several
/// collections acquire locks in enum order (users < bounties < claims <
/// workouts < recurring_workouts).
#[derive(Clone)]
pub struct CollectionStore {
    blobs: Arc<dyn BlobStore>,
    locks: Arc<[Mutex<()>; COLLECTION_COUNT]>,
}

impl CollectionStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            locks: Arc::new(std::array::from_fn(|_| Mutex::new(()))),
        }
    }

    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    pub async fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.locks[collection.index()].lock().await
    }

    /// Missing blob means the collection is empty; any other storage failure
    /// propagates so the caller reports it instead of silently losing data.
    pub async fn load<T: Record>(&self, collection: Collection) -> ApiResult<Vec<T>> {
        match self.blobs.get_object(&collection.key()).await? {
            Some(bytes) => {
                let items = serde_json::from_slice(&bytes)
                    .with_context(|| format!("decode collection {}", collection.name()))
                    .map_err(ApiError::Storage)?;
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn store<T: Record>(&self, collection: Collection, items: &[T]) -> ApiResult<()> {
        let body = serde_json::to_vec_pretty(items)
            .with_context(|| format!("encode collection {}", collection.name()))
            .map_err(ApiError::Storage)?;
        self.blobs
            .put_object(&collection.key(), Bytes::from(body), "application/json")
            .await?;
        Ok(())
    }
}
