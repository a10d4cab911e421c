//! Core types for chipi.

pub mod category;
pub mod training_data;

pub use category::{is_protected, Category, PROTECTED_CATEGORIES};
pub use training_data::{TrainingData, TrainingStats};
