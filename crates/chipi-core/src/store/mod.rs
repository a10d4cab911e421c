//! Persistence for training data.
//!
//! The whole mapping is the unit of storage: `load` reads it once at startup
//! and `save` rewrites it after every mutation.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::ChipiResult;
use crate::types::TrainingData;

/// Core storage trait - every backing store for training data implements this.
#[async_trait]
pub trait TrainingStore: Send + Sync {
    /// Load the stored mapping, or the default seed when nothing is stored yet.
    ///
    /// The seed is not written back; the first mutation creates the document.
    async fn load(&self) -> ChipiResult<TrainingData>;

    /// Replace the stored mapping with `data`.
    async fn save(&self, data: &TrainingData) -> ChipiResult<()>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}
