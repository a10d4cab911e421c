//! The training data aggregate and the operations handlers perform on it.
//!
//! Each operation validates in a fixed order (category, then index, then
//! required text) and either applies its change completely or returns an
//! error without touching the mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChipiError, ChipiResult, ErrorCode};
use crate::types::category::{is_protected, Category};

/// Mapping from category name to [`Category`], in creation order.
///
/// Serializes as a plain JSON object keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingData {
    categories: IndexMap<String, Category>,
}

/// Aggregate counts across every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    pub total_categories: usize,
    pub total_patterns: usize,
    pub total_responses: usize,
    pub categories: Vec<String>,
}

impl TrainingData {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names in creation order.
    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Iterate over `(name, category)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> ChipiResult<&Category> {
        self.categories
            .get(name)
            .ok_or_else(|| ChipiError::category_not_found(name))
    }

    fn category_mut(&mut self, name: &str) -> ChipiResult<&mut Category> {
        self.categories
            .get_mut(name)
            .ok_or_else(|| ChipiError::category_not_found(name))
    }

    /// Append a response and return the new response count.
    pub fn add_response(&mut self, name: &str, text: &str) -> ChipiResult<usize> {
        let category = self.category_mut(name)?;
        if text.is_empty() {
            return Err(ChipiError::missing_field("Response text is required"));
        }
        category.responses.push(text.to_string());
        Ok(category.responses.len())
    }

    /// Append a pattern unless the category already has it; returns the new
    /// pattern count.
    pub fn add_pattern(&mut self, name: &str, pattern: &str) -> ChipiResult<usize> {
        let category = self.category_mut(name)?;
        if pattern.is_empty() {
            return Err(ChipiError::missing_field("Pattern is required"));
        }
        if category.has_pattern(pattern) {
            return Err(ChipiError::invalid_input(
                "Pattern already exists",
                ErrorCode::DuplicatePattern,
            ));
        }
        category.patterns.push(pattern.to_string());
        Ok(category.patterns.len())
    }

    /// Create a new category at the end of the mapping.
    pub fn create_category(
        &mut self,
        name: &str,
        patterns: Vec<String>,
        responses: Vec<String>,
    ) -> ChipiResult<()> {
        if name.is_empty() {
            return Err(ChipiError::missing_field("Category name is required"));
        }
        if self.contains(name) {
            return Err(ChipiError::invalid_input(
                "Category already exists",
                ErrorCode::DuplicateCategory,
            ));
        }
        self.categories
            .insert(name.to_string(), Category::new(patterns, responses));
        Ok(())
    }

    /// Insert or replace a category wholesale. Used to build seeds.
    pub fn insert(&mut self, name: impl Into<String>, category: Category) {
        self.categories.insert(name.into(), category);
    }

    /// Replace the response at `index`.
    pub fn update_response(&mut self, name: &str, index: usize, text: &str) -> ChipiResult<()> {
        let category = self.category_mut(name)?;
        let slot = category
            .responses
            .get_mut(index)
            .ok_or_else(ChipiError::index_out_of_range)?;
        if text.is_empty() {
            return Err(ChipiError::missing_field("Response text is required"));
        }
        *slot = text.to_string();
        Ok(())
    }

    /// Remove the response at `index` and return its text.
    pub fn delete_response(&mut self, name: &str, index: usize) -> ChipiResult<String> {
        let category = self.category_mut(name)?;
        if index >= category.responses.len() {
            return Err(ChipiError::index_out_of_range());
        }
        Ok(category.responses.remove(index))
    }

    /// Remove a category. Protected names are refused whether or not the
    /// mapping holds them.
    pub fn delete_category(&mut self, name: &str) -> ChipiResult<Category> {
        if is_protected(name) {
            return Err(ChipiError::invalid_input(
                "Cannot delete core categories",
                ErrorCode::ProtectedCategory,
            ));
        }
        self.categories
            .shift_remove(name)
            .ok_or_else(|| ChipiError::category_not_found(name))
    }

    /// Count categories, patterns and responses.
    pub fn stats(&self) -> TrainingStats {
        TrainingStats {
            total_categories: self.categories.len(),
            total_patterns: self.categories.values().map(|c| c.patterns.len()).sum(),
            total_responses: self.categories.values().map(|c| c.responses.len()).sum(),
            categories: self.category_names(),
        }
    }
}
