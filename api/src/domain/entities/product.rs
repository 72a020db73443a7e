//! Product domain entity
//!
//! An inventory item identified by a globally unique SKU and tracked by
//! quantity. Categories are referenced by free-text label only; there is no
//! foreign key into the categories table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Violation;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product lifecycle status
///
/// Soft delete moves a product to `Inactive`; the record stays in the store
/// and its SKU stays reserved. Hard delete removes the record entirely and
/// has no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            _ => Err(format!("Unknown product status: {}", s)),
        }
    }
}

/// An inventory item
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    /// Low-stock alert threshold; 0 disables alerting for this product.
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check if the product is at or below its restock threshold.
    /// A threshold of zero opts the product out of low-stock alerting.
    pub fn is_low_stock(&self) -> bool {
        self.min_quantity > 0 && self.quantity <= self.min_quantity
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Stock value of this line: price × quantity.
    pub fn inventory_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Data needed to create a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
}

impl NewProduct {
    /// Field constraint check, run before any store write.
    pub fn validate(&self) -> Vec<Violation> {
        product_field_violations(
            &self.name,
            self.description.as_deref(),
            &self.sku,
            self.price,
            self.quantity,
            self.min_quantity,
            self.category.as_deref(),
            self.brand.as_deref(),
            self.unit.as_deref(),
        )
    }
}

/// Full set of mutable fields for an update. An update overwrites the stored
/// record; identifier and created-at are never touched.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub status: ProductStatus,
}

impl UpdateProduct {
    pub fn validate(&self) -> Vec<Violation> {
        product_field_violations(
            &self.name,
            self.description.as_deref(),
            &self.sku,
            self.price,
            self.quantity,
            self.min_quantity,
            self.category.as_deref(),
            self.brand.as_deref(),
            self.unit.as_deref(),
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn product_field_violations(
    name: &str,
    description: Option<&str>,
    sku: &str,
    price: Decimal,
    quantity: i32,
    min_quantity: i32,
    category: Option<&str>,
    brand: Option<&str>,
    unit: Option<&str>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let name_len = name.trim().chars().count();
    if name_len == 0 {
        violations.push(Violation::new("name", "Product name is required"));
    } else if !(2..=100).contains(&name_len) {
        violations.push(Violation::new(
            "name",
            "Product name must be between 2 and 100 characters",
        ));
    }

    if let Some(description) = description {
        if description.chars().count() > 500 {
            violations.push(Violation::new(
                "description",
                "Description cannot exceed 500 characters",
            ));
        }
    }

    let sku_len = sku.trim().chars().count();
    if sku_len == 0 {
        violations.push(Violation::new("sku", "SKU is required"));
    } else if !(3..=20).contains(&sku_len) {
        violations.push(Violation::new(
            "sku",
            "SKU must be between 3 and 20 characters",
        ));
    }

    if price <= Decimal::ZERO {
        violations.push(Violation::new("price", "Price must be greater than 0"));
    } else if price.normalize().scale() > 2 {
        violations.push(Violation::new(
            "price",
            "Price cannot have more than two decimal places",
        ));
    }

    if quantity < 0 {
        violations.push(Violation::new("quantity", "Quantity cannot be negative"));
    }

    if min_quantity < 0 {
        violations.push(Violation::new(
            "min_quantity",
            "Minimum quantity cannot be negative",
        ));
    }

    if let Some(category) = category {
        if category.chars().count() > 50 {
            violations.push(Violation::new(
                "category",
                "Category cannot exceed 50 characters",
            ));
        }
    }

    if let Some(brand) = brand {
        if brand.chars().count() > 50 {
            violations.push(Violation::new("brand", "Brand cannot exceed 50 characters"));
        }
    }

    if let Some(unit) = unit {
        if unit.chars().count() > 20 {
            violations.push(Violation::new("unit", "Unit cannot exceed 20 characters"));
        }
    }

    violations
}

/// Multi-criteria search filter.
///
/// Absent criteria match everything; present criteria combine with logical
/// AND. This struct is the single definition of the search semantics: the
/// SQL adapter translates it to predicates, the in-memory store evaluates
/// `matches` directly.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Exact category label match
    pub category: Option<String>,
    /// Exact brand match
    pub brand: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,
    /// Inclusive lower quantity bound
    pub min_quantity: Option<i32>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !product
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if product.brand.as_deref() != Some(brand.as_str()) {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if product.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if product.price > max_price {
                return false;
            }
        }
        if let Some(min_quantity) = self.min_quantity {
            if product.quantity < min_quantity {
                return false;
            }
        }
        true
    }
}

/// One row of the products-per-category report.
///
/// `category` is `None` for products without a label; empty labels count
/// toward the same group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: u64,
}
