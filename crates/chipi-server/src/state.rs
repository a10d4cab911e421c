//! Server state management.

use std::sync::Arc;

use chipi_core::{ChipiResult, TrainingData, TrainingStore};
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state.
///
/// Reads share the lock. Mutations hold the write lock across
/// mutate → save → commit, so they are serialized and a failed save never
/// leaves the in-memory mapping ahead of the stored document.
#[derive(Clone)]
pub struct AppState {
    data: Arc<RwLock<TrainingData>>,
    store: Arc<dyn TrainingStore>,
}

impl AppState {
    /// Create state from an already loaded mapping.
    pub fn new(data: TrainingData, store: Arc<dyn TrainingStore>) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            store,
        }
    }

    /// Load the mapping from `store` and wrap it.
    pub async fn load(store: Arc<dyn TrainingStore>) -> ChipiResult<Self> {
        let data = store.load().await?;
        info!(
            location = %store.location(),
            categories = data.len(),
            "Training data ready"
        );
        Ok(Self::new(data, store))
    }

    /// Run `f` against the current mapping under the read lock.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TrainingData) -> T,
    {
        let guard = self.data.read().await;
        f(&guard)
    }

    /// Apply `f` to a copy of the mapping, persist the copy, then commit it.
    ///
    /// If `f` or the save fails, the live mapping is left untouched.
    pub async fn mutate<F, T>(&self, f: F) -> ChipiResult<T>
    where
        F: FnOnce(&mut TrainingData) -> ChipiResult<T>,
    {
        let mut guard = self.data.write().await;
        let mut draft = guard.clone();
        let output = f(&mut draft)?;
        self.store.save(&draft).await?;
        *guard = draft;
        Ok(output)
    }

    /// Replace the mapping with the default seed and persist it.
    pub async fn reset(&self) -> ChipiResult<()> {
        self.mutate(|data| {
            *data = TrainingData::default_seed();
            Ok(())
        })
        .await
    }

    /// Clone of the current mapping.
    pub async fn snapshot(&self) -> TrainingData {
        self.data.read().await.clone()
    }

    /// Where the mapping is persisted.
    pub fn store_location(&self) -> String {
        self.store.location()
    }
}
