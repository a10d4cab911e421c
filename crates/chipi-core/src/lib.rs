//! chipi-core - Core library for chipi.
//!
//! This crate provides the training data model for the Chipi rule-based
//! chat responder: categories of trigger patterns and candidate responses,
//! the default seed, and the stores that persist the whole mapping.
//!
//! # Example
//!
//! ```ignore
//! use chipi_core::{JsonFileStore, TrainingStore};
//!
//! let store = JsonFileStore::new("training_data.json");
//! let mut data = store.load().await?;
//!
//! data.add_response("greetings", "Hey there!")?;
//! store.save(&data).await?;
//! ```

pub mod config;
pub mod error;
pub mod seed;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::ChipiConfig;
pub use error::{ChipiError, ChipiResult, ErrorCode};
pub use store::{JsonFileStore, MemoryStore, TrainingStore};
pub use types::{is_protected, Category, TrainingData, TrainingStats, PROTECTED_CATEGORIES};
