//! Report handlers
//!
//! Read-only inventory reports: restock alerts and aggregates.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppError;
use crate::handlers::products::ProductResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct InventoryValueResponse {
    pub total_value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CategoryCountResponse {
    /// None groups the products without a category label
    pub category: Option<String>,
    pub count: u64,
}

/// GET /reports/low-stock
pub async fn low_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.low_stock_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /reports/out-of-stock
pub async fn out_of_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.out_of_stock_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /reports/inventory-value
pub async fn inventory_value(
    State(state): State<AppState>,
) -> Result<Json<InventoryValueResponse>, AppError> {
    let total_value = state.product_service.total_inventory_value().await?;
    Ok(Json(InventoryValueResponse { total_value }))
}

/// GET /reports/products-by-category
pub async fn products_by_category(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryCountResponse>>, AppError> {
    let counts = state.product_service.product_count_by_category().await?;
    Ok(Json(
        counts
            .into_iter()
            .map(|c| CategoryCountResponse {
                category: c.category,
                count: c.count,
            })
            .collect(),
    ))
}
