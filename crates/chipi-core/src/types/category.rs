//! Category type: a named group of trigger patterns and candidate responses.

use serde::{Deserialize, Serialize};

/// Categories that may never be removed through delete-category.
pub const PROTECTED_CATEGORIES: [&str; 3] = ["greetings", "help", "goodbye"];

/// Returns true if `name` is one of the protected categories.
pub fn is_protected(name: &str) -> bool {
    PROTECTED_CATEGORIES.contains(&name)
}

/// Patterns and responses stored under one category name.
///
/// Patterns are inert trigger phrases; nothing in this service matches them
/// against user input. Responses are addressed by their 0-based position.
///
/// Deserialization goes through [`Category::new`], so a hand-edited
/// document cannot load with repeated patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCategory")]
pub struct Category {
    /// Trigger phrases, unique within the category.
    pub patterns: Vec<String>,
    /// Candidate replies in insertion order.
    pub responses: Vec<String>,
}

/// On-disk layout of a category, before pattern de-duplication.
#[derive(Deserialize)]
struct StoredCategory {
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

impl From<StoredCategory> for Category {
    fn from(stored: StoredCategory) -> Self {
        Category::new(stored.patterns, stored.responses)
    }
}

impl Category {
    /// Create a category from pattern and response lists.
    ///
    /// Repeated patterns collapse onto their first occurrence.
    pub fn new(patterns: Vec<String>, responses: Vec<String>) -> Self {
        let mut category = Self {
            patterns: Vec::with_capacity(patterns.len()),
            responses,
        };
        for pattern in patterns {
            if !category.has_pattern(&pattern) {
                category.patterns.push(pattern);
            }
        }
        category
    }

    /// Check whether the category already holds `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }
}
