//! In-memory store, for tests and ephemeral runs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::TrainingStore;
use crate::error::{ChipiError, ChipiResult};
use crate::types::TrainingData;

/// Keeps the last saved mapping in memory.
///
/// Saves can be switched to fail, which lets callers exercise their
/// persistence-failure path without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<TrainingData>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store; `load` returns the default seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `data`.
    pub fn with_data(data: TrainingData) -> Self {
        Self {
            saved: Mutex::new(Some(data)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// The last saved mapping, if any.
    pub fn snapshot(&self) -> Option<TrainingData> {
        self.saved.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TrainingStore for MemoryStore {
    async fn load(&self) -> ChipiResult<TrainingData> {
        Ok(self.snapshot().unwrap_or_else(TrainingData::default_seed))
    }

    async fn save(&self, data: &TrainingData) -> ChipiResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ChipiError::persistence(
                "Memory store rejected save",
                std::io::Error::new(std::io::ErrorKind::Other, "save disabled"),
            ));
        }

        let mut guard = self
            .saved
            .lock()
            .map_err(|_| ChipiError::Internal("memory store lock poisoned".to_string()))?;
        *guard = Some(data.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
