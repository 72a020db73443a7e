//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture creates a valid entity or draft that tests can customize.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Category, CategoryId, CategoryStatus, NewCategory, NewProduct, Product, ProductId,
    ProductStatus,
};

/// Create a stored product with the given SKU and stock levels
pub fn test_product_with(sku: &str, quantity: i32, min_quantity: i32) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(),
        name: format!("Widget {}", sku),
        description: Some("A test widget".to_string()),
        sku: sku.to_string(),
        price: Decimal::new(999, 2),
        quantity,
        min_quantity,
        category: Some("Widgets".to_string()),
        brand: Some("Acme".to_string()),
        unit: Some("pcs".to_string()),
        status: ProductStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

/// Create a valid new-product draft with the given SKU
pub fn new_product_draft(sku: &str) -> NewProduct {
    NewProduct {
        name: format!("Widget {}", sku),
        description: None,
        sku: sku.to_string(),
        price: Decimal::new(999, 2),
        quantity: 0,
        min_quantity: 0,
        category: Some("Widgets".to_string()),
        brand: Some("Acme".to_string()),
        unit: Some("pcs".to_string()),
    }
}

/// Create a stored category with the given name
pub fn test_category_named(name: &str) -> Category {
    let now = Utc::now();
    Category {
        id: CategoryId::new(),
        name: name.to_string(),
        description: Some(format!("{} and related items", name)),
        status: CategoryStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

/// Create a valid new-category draft with the given name
pub fn new_category_draft(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: None,
    }
}
