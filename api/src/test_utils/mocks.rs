//! In-memory repository implementations
//!
//! These back the service unit tests. Every check-then-write operation runs
//! under a single `RwLock` write guard, which serializes writers the same
//! way the PostgreSQL adapter's transactions do, so the concurrency
//! contract of the ports holds here too.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{
    Category, CategoryCount, CategoryId, CategoryStatus, NewCategory, NewProduct, Product,
    ProductFilter, ProductId, ProductSortField, ProductStatus, SortDirection, UpdateCategory,
    UpdateProduct,
};
use crate::domain::ports::{CategoryRepository, ProductRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products
            .write()
            .unwrap()
            .insert(product.id.0, product);
        self
    }
}

fn sort_products(products: &mut [Product], field: ProductSortField, direction: SortDirection) {
    products.sort_by(|a, b| {
        let ordering = match field {
            ProductSortField::Id => a.id.cmp(&b.id),
            ProductSortField::Name => a.name.cmp(&b.name),
            ProductSortField::Sku => a.sku.cmp(&b.sku),
            ProductSortField::Price => a.price.cmp(&b.price),
            ProductSortField::Quantity => a.quantity.cmp(&b.quantity),
            ProductSortField::Category => a.category.cmp(&b.category),
            ProductSortField::Brand => a.brand.cmp(&b.brand),
            ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn paginate<T: Clone>(items: &[T], page_index: u64, page_size: u64) -> Vec<T> {
    items
        .iter()
        .skip((page_index * page_size) as usize)
        .take(page_size as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.get(&id.0).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().find(|p| p.sku == sku).cloned())
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().any(|p| p.sku == sku))
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Product>, DomainError> {
        let needle = name.to_lowercase();
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.brand.as_deref() == Some(brand))
            .cloned()
            .collect())
    }

    async fn find_active(&self) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().filter(|p| p.is_active()).cloned().collect())
    }

    async fn find_low_stock(&self) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect())
    }

    async fn find_by_quantity(&self, quantity: i32) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.quantity == quantity)
            .cloned()
            .collect())
    }

    async fn find_all(
        &self,
        page_index: u64,
        page_size: u64,
        sort_field: ProductSortField,
        direction: SortDirection,
    ) -> Result<(Vec<Product>, u64), DomainError> {
        let products = self.products.read().unwrap();
        let mut all: Vec<Product> = products.values().cloned().collect();
        let total = all.len() as u64;
        sort_products(&mut all, sort_field, direction);
        Ok((paginate(&all, page_index, page_size), total))
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<(Vec<Product>, u64), DomainError> {
        let products = self.products.read().unwrap();
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        sort_products(
            &mut matching,
            ProductSortField::Id,
            SortDirection::Ascending,
        );
        Ok((paginate(&matching, page_index, page_size), total))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        // Write guard held across check and insert
        let mut products = self.products.write().unwrap();

        if products.values().any(|p| p.sku == product.sku) {
            return Err(DomainError::DuplicateKey(format!(
                "Product with SKU {} already exists",
                product.sku
            )));
        }

        let now = Utc::now();
        let created = Product {
            id: ProductId::new(),
            name: product.name.clone(),
            description: product.description.clone(),
            sku: product.sku.clone(),
            price: product.price,
            quantity: product.quantity,
            min_quantity: product.min_quantity,
            category: product.category.clone(),
            brand: product.brand.clone(),
            unit: product.unit.clone(),
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        };
        products.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
    ) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();

        let current_sku = match products.get(&id.0) {
            Some(p) => p.sku.clone(),
            None => {
                return Err(DomainError::NotFound(format!("Product {} not found", id)));
            }
        };
        if changes.sku != current_sku
            && products
                .values()
                .any(|p| p.id != *id && p.sku == changes.sku)
        {
            return Err(DomainError::DuplicateKey(format!(
                "Product with SKU {} already exists",
                changes.sku
            )));
        }

        let product = products.get_mut(&id.0).unwrap();
        product.name = changes.name.clone();
        product.description = changes.description.clone();
        product.sku = changes.sku.clone();
        product.price = changes.price;
        product.quantity = changes.quantity;
        product.min_quantity = changes.min_quantity;
        product.category = changes.category.clone();
        product.brand = changes.brand.clone();
        product.unit = changes.unit.clone();
        product.status = changes.status;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn update_status(
        &self,
        id: &ProductId,
        status: ProductStatus,
    ) -> Result<(), DomainError> {
        let mut products = self.products.write().unwrap();
        match products.get_mut(&id.0) {
            Some(product) => {
                product.status = status;
                product.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Product {} not found", id))),
        }
    }

    async fn adjust_quantity(&self, id: &ProductId, delta: i32) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();
        match products.get_mut(&id.0) {
            Some(product) => {
                let new_quantity = i64::from(product.quantity) + i64::from(delta);
                if new_quantity < 0 {
                    return Err(DomainError::InsufficientStock {
                        available: product.quantity,
                        requested: -delta,
                    });
                }
                product.quantity = new_quantity as i32;
                product.updated_at = Utc::now();
                Ok(product.clone())
            }
            None => Err(DomainError::NotFound(format!("Product {} not found", id))),
        }
    }

    async fn set_quantity(&self, id: &ProductId, quantity: i32) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();
        match products.get_mut(&id.0) {
            Some(product) => {
                product.quantity = quantity;
                product.updated_at = Utc::now();
                Ok(product.clone())
            }
            None => Err(DomainError::NotFound(format!("Product {} not found", id))),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut products = self.products.write().unwrap();
        match products.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Product {} not found", id))),
        }
    }

    async fn total_inventory_value(&self) -> Result<Decimal, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().map(Product::inventory_value).sum())
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, DomainError> {
        let products = self.products.read().unwrap();
        let mut counts: HashMap<Option<String>, u64> = HashMap::new();
        for product in products.values() {
            // Empty labels group with the unlabeled products
            let label = product
                .category
                .clone()
                .filter(|c| !c.is_empty());
            *counts.entry(label).or_insert(0) += 1;
        }
        let mut rows: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        rows.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(rows)
    }
}

// ============================================================================
// In-Memory Category Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a category for testing
    pub fn with_category(self, category: Category) -> Self {
        self.categories
            .write()
            .unwrap()
            .insert(category.id.0, category);
        self
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.get(&id.0).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.values().any(|c| c.name == name))
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_active(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        let mut active: Vec<Category> = categories
            .values()
            .filter(|c| c.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Category>, DomainError> {
        let needle = name.to_lowercase();
        let categories = self.categories.read().unwrap();
        Ok(categories
            .values()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        // Write guard held across check and insert
        let mut categories = self.categories.write().unwrap();

        if categories.values().any(|c| c.name == category.name) {
            return Err(DomainError::DuplicateKey(format!(
                "Category with name {} already exists",
                category.name
            )));
        }

        let now = Utc::now();
        let created = Category {
            id: CategoryId::new(),
            name: category.name.clone(),
            description: category.description.clone(),
            status: CategoryStatus::Active,
            created_at: now,
            updated_at: now,
        };
        categories.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
    ) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().unwrap();

        let current_name = match categories.get(&id.0) {
            Some(c) => c.name.clone(),
            None => {
                return Err(DomainError::NotFound(format!("Category {} not found", id)));
            }
        };
        if changes.name != current_name
            && categories
                .values()
                .any(|c| c.id != *id && c.name == changes.name)
        {
            return Err(DomainError::DuplicateKey(format!(
                "Category with name {} already exists",
                changes.name
            )));
        }

        let category = categories.get_mut(&id.0).unwrap();
        category.name = changes.name.clone();
        category.description = changes.description.clone();
        category.status = changes.status;
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn update_status(
        &self,
        id: &CategoryId,
        status: CategoryStatus,
    ) -> Result<(), DomainError> {
        let mut categories = self.categories.write().unwrap();
        match categories.get_mut(&id.0) {
            Some(category) => {
                category.status = status;
                category.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Category {} not found", id))),
        }
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError> {
        let mut categories = self.categories.write().unwrap();
        match categories.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Category {} not found", id))),
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.len() as u64)
    }
}
