//! SeaORM model for the `products` table

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::domain::entities::{Product, ProductId, ProductStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(unique)]
    pub sku: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        // Rows only ever hold the strings this code writes; fall back to
        // Active on anything unexpected.
        let status = m.status.parse().unwrap_or(ProductStatus::Active);
        Product {
            id: ProductId(m.id),
            name: m.name,
            description: m.description,
            sku: m.sku,
            price: m.price,
            quantity: m.quantity,
            min_quantity: m.min_quantity,
            category: m.category,
            brand: m.brand,
            unit: m.unit,
            status,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
