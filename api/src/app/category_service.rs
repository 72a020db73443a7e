//! Category service
//!
//! Owns category identity (globally unique name) and the active/inactive
//! lifecycle. Categories are weakly referenced from products by label, so
//! renames deliberately do not cascade.

use std::sync::Arc;

use crate::domain::entities::{
    Category, CategoryId, CategoryStatus, NewCategory, UpdateCategory,
};
use crate::domain::ports::CategoryRepository;
use crate::error::DomainError;

/// Service for managing categories
pub struct CategoryService<R>
where
    R: CategoryRepository,
{
    categories: Arc<R>,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    /// Create a new category; fails with `DuplicateKey` when the name exists
    pub async fn create_category(&self, draft: NewCategory) -> Result<Category, DomainError> {
        let violations = draft.validate();
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.categories.create(&draft).await
    }

    /// Find a category by ID
    pub async fn get_category(&self, id: &CategoryId) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Category {} not found", id)))
    }

    /// Find a category by name
    pub async fn get_category_by_name(&self, name: &str) -> Result<Category, DomainError> {
        self.categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Category {} not found", name)))
    }

    /// Overwrite name, description and status. Renaming onto a name another
    /// category holds fails with `DuplicateKey`. Products keep the old label.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        changes: UpdateCategory,
    ) -> Result<Category, DomainError> {
        let violations = changes.validate();
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.categories.update(id, &changes).await
    }

    /// Soft delete: the record stays, only the status flips to Inactive
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), DomainError> {
        self.categories
            .update_status(id, CategoryStatus::Inactive)
            .await
    }

    /// Permanently remove the record. Used sparingly.
    pub async fn hard_delete_category(&self, id: &CategoryId) -> Result<(), DomainError> {
        self.categories.delete(id).await
    }

    /// All categories, active and inactive
    pub async fn all_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.find_all().await
    }

    /// Categories with status Active, for selection lists
    pub async fn active_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.find_active().await
    }

    /// Case-insensitive substring search on name
    pub async fn search_categories(&self, name: &str) -> Result<Vec<Category>, DomainError> {
        self.categories.find_by_name_containing(name).await
    }

    /// Check whether a category with the name exists
    pub async fn category_exists(&self, name: &str) -> Result<bool, DomainError> {
        self.categories.exists_by_name(name).await
    }

    /// Total number of categories
    pub async fn category_count(&self) -> Result<u64, DomainError> {
        self.categories.count().await
    }
}
