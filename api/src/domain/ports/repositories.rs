//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL) and by the
//! in-memory stores used in tests.
//!
//! Operations that pair a uniqueness or existence check with a write
//! (`create`, `update`, `adjust_quantity`, `set_quantity`, `update_status`)
//! are atomic: implementations serialize the check and the write against
//! concurrent writers touching the same key, so two racing creations of one
//! SKU or two racing stock adjustments on one product can never both pass
//! their precondition. Read-only operations take no exclusivity.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Category, CategoryCount, CategoryId, CategoryStatus, NewCategory, NewProduct, Product,
    ProductFilter, ProductId, ProductSortField, ProductStatus, SortDirection, UpdateCategory,
    UpdateProduct,
};
use crate::error::DomainError;

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Find a product by SKU (exact, case-sensitive)
    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError>;

    /// Check whether any product, active or inactive, carries the SKU
    async fn exists_by_sku(&self, sku: &str) -> Result<bool, DomainError>;

    /// Case-insensitive substring match on name
    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Product>, DomainError>;

    /// Exact category label match
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError>;

    /// Exact brand match
    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, DomainError>;

    /// Products with status Active
    async fn find_active(&self) -> Result<Vec<Product>, DomainError>;

    /// Products at or below their non-zero restock threshold
    async fn find_low_stock(&self) -> Result<Vec<Product>, DomainError>;

    /// Products holding exactly the given quantity
    async fn find_by_quantity(&self, quantity: i32) -> Result<Vec<Product>, DomainError>;

    /// One sorted page of all products plus the total record count
    async fn find_all(
        &self,
        page_index: u64,
        page_size: u64,
        sort_field: ProductSortField,
        direction: SortDirection,
    ) -> Result<(Vec<Product>, u64), DomainError>;

    /// One page of products matching the filter plus the count of ALL
    /// matches (not just the page)
    async fn search(
        &self,
        filter: &ProductFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<(Vec<Product>, u64), DomainError>;

    /// Insert a new product; fails with `DuplicateKey` when the SKU exists
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Overwrite all mutable fields; fails with `DuplicateKey` when the SKU
    /// is changed onto one another record already holds
    async fn update(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
    ) -> Result<Product, DomainError>;

    /// Transition the lifecycle status (soft delete / reactivation)
    async fn update_status(
        &self,
        id: &ProductId,
        status: ProductStatus,
    ) -> Result<(), DomainError>;

    /// Apply a signed stock delta atomically; fails with `InsufficientStock`
    /// when the result would be negative. Returns the updated record.
    async fn adjust_quantity(&self, id: &ProductId, delta: i32) -> Result<Product, DomainError>;

    /// Overwrite the quantity (callers reject negative values first)
    async fn set_quantity(&self, id: &ProductId, quantity: i32) -> Result<Product, DomainError>;

    /// Permanently remove the record, regardless of status
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;

    /// Σ price × quantity over every product; 0 for an empty store
    async fn total_inventory_value(&self) -> Result<Decimal, DomainError>;

    /// Product count per category label; unlabeled products group under None
    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, DomainError>;
}

/// Repository for Category entities
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// Find a category by name (exact)
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    /// Check whether a category with the name exists
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// All categories, active and inactive
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    /// Categories with status Active
    async fn find_active(&self) -> Result<Vec<Category>, DomainError>;

    /// Case-insensitive substring match on name
    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Category>, DomainError>;

    /// Insert a new category; fails with `DuplicateKey` when the name exists
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;

    /// Overwrite name, description and status; fails with `DuplicateKey`
    /// when renamed onto an existing name
    async fn update(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
    ) -> Result<Category, DomainError>;

    /// Transition the lifecycle status (soft delete / reactivation)
    async fn update_status(
        &self,
        id: &CategoryId,
        status: CategoryStatus,
    ) -> Result<(), DomainError>;

    /// Permanently remove the record
    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError>;

    /// Total number of categories
    async fn count(&self) -> Result<u64, DomainError>;
}
