//! Product service
//!
//! Owns product identity (unique SKU), price and quantity invariants, stock
//! mutation, and search/aggregation logic. Uniqueness checks and the writes
//! they guard run as one atomic unit inside the store; this layer holds no
//! shared state of its own.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{
    CategoryCount, NewProduct, Page, Product, ProductFilter, ProductId, ProductSortField,
    ProductStatus, SortDirection, UpdateProduct,
};
use crate::domain::ports::ProductRepository;
use crate::error::{DomainError, Violation};

/// Service for managing products
pub struct ProductService<R>
where
    R: ProductRepository,
{
    products: Arc<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    /// Create a new product.
    ///
    /// Validates the draft first; the SKU uniqueness check and the insert
    /// are a single atomic unit inside the store.
    pub async fn create_product(&self, draft: NewProduct) -> Result<Product, DomainError> {
        let violations = draft.validate();
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.products.create(&draft).await
    }

    /// Find a product by ID
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product {} not found", id)))
    }

    /// Find a product by SKU
    pub async fn get_product_by_sku(&self, sku: &str) -> Result<Product, DomainError> {
        self.products
            .find_by_sku(sku)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product with SKU {} not found", sku)))
    }

    /// Overwrite all mutable fields of an existing product.
    ///
    /// The identifier and created-at timestamp are never altered. Changing
    /// the SKU onto one another record holds fails with `DuplicateKey`.
    pub async fn update_product(
        &self,
        id: &ProductId,
        changes: UpdateProduct,
    ) -> Result<Product, DomainError> {
        let violations = changes.validate();
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }
        self.products.update(id, &changes).await
    }

    /// Soft delete: the record stays in the store, only the status flips to
    /// Inactive. The SKU stays reserved.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), DomainError> {
        self.products
            .update_status(id, ProductStatus::Inactive)
            .await
    }

    /// Permanently remove the record. Irreversible, bypasses the status.
    pub async fn hard_delete_product(&self, id: &ProductId) -> Result<(), DomainError> {
        self.products.delete(id).await
    }

    /// Increase stock by a non-negative amount
    pub async fn add_stock(&self, id: &ProductId, amount: i32) -> Result<Product, DomainError> {
        if amount < 0 {
            return Err(DomainError::InvalidQuantity(format!(
                "Quantity to add cannot be negative, got {}",
                amount
            )));
        }
        self.products.adjust_quantity(id, amount).await
    }

    /// Decrease stock by a non-negative amount; fails with
    /// `InsufficientStock` when the amount exceeds the current quantity.
    pub async fn remove_stock(&self, id: &ProductId, amount: i32) -> Result<Product, DomainError> {
        if amount < 0 {
            return Err(DomainError::InvalidQuantity(format!(
                "Quantity to remove cannot be negative, got {}",
                amount
            )));
        }
        self.products.adjust_quantity(id, -amount).await
    }

    /// Overwrite the quantity (stocktake correction)
    pub async fn set_quantity(
        &self,
        id: &ProductId,
        quantity: i32,
    ) -> Result<Product, DomainError> {
        if quantity < 0 {
            return Err(DomainError::InvalidQuantity(format!(
                "Quantity cannot be negative, got {}",
                quantity
            )));
        }
        self.products.set_quantity(id, quantity).await
    }

    /// Multi-criteria search. Absent criteria act as wildcards; present ones
    /// combine with AND. Totals are computed over the filtered set.
    pub async fn search_products(
        &self,
        filter: &ProductFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<Page<Product>, DomainError> {
        check_page_size(page_size)?;
        let (items, total) = self.products.search(filter, page_index, page_size).await?;
        Ok(Page::new(items, page_index, page_size, total))
    }

    /// One sorted page of all products, unfiltered
    pub async fn list_products(
        &self,
        page_index: u64,
        page_size: u64,
        sort_field: ProductSortField,
        direction: SortDirection,
    ) -> Result<Page<Product>, DomainError> {
        check_page_size(page_size)?;
        let (items, total) = self
            .products
            .find_all(page_index, page_size, sort_field, direction)
            .await?;
        Ok(Page::new(items, page_index, page_size, total))
    }

    /// Products at or below their non-zero restock threshold
    pub async fn low_stock_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.find_low_stock().await
    }

    /// Products with zero quantity, regardless of threshold
    pub async fn out_of_stock_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.find_by_quantity(0).await
    }

    /// Products with status Active
    pub async fn active_products(&self) -> Result<Vec<Product>, DomainError> {
        self.products.find_active().await
    }

    /// Products carrying the exact category label
    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        self.products.find_by_category(category).await
    }

    /// Products of the exact brand
    pub async fn products_by_brand(&self, brand: &str) -> Result<Vec<Product>, DomainError> {
        self.products.find_by_brand(brand).await
    }

    /// Case-insensitive substring search on name
    pub async fn products_by_name(&self, name: &str) -> Result<Vec<Product>, DomainError> {
        self.products.find_by_name_containing(name).await
    }

    /// Check whether a SKU is taken (active or inactive product)
    pub async fn product_exists_by_sku(&self, sku: &str) -> Result<bool, DomainError> {
        self.products.exists_by_sku(sku).await
    }

    /// Σ price × quantity over the whole store; 0 when empty
    pub async fn total_inventory_value(&self) -> Result<Decimal, DomainError> {
        self.products.total_inventory_value().await
    }

    /// Product count per category label
    pub async fn product_count_by_category(&self) -> Result<Vec<CategoryCount>, DomainError> {
        self.products.count_by_category().await
    }
}

fn check_page_size(page_size: u64) -> Result<(), DomainError> {
    if page_size == 0 {
        return Err(DomainError::Validation(vec![Violation::new(
            "page_size",
            "Page size must be at least 1",
        )]));
    }
    Ok(())
}
