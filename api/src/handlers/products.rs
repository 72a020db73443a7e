//! Product handlers
//!
//! JSON endpoints for product CRUD, stock mutation, listing and search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    NewProduct, Page, Product, ProductFilter, ProductId, ProductSortField, ProductStatus,
    SortDirection, UpdateProduct,
};
use crate::error::AppError;
use crate::AppState;

/// Response shape for a single product
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            sku: p.sku,
            price: p.price,
            quantity: p.quantity,
            min_quantity: p.min_quantity,
            category: p.category,
            brand: p.brand,
            unit: p.unit,
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a new product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
}

/// Request to update a product; overwrites all mutable fields
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub min_quantity: i32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    /// "active" or "inactive"; defaults to active
    pub status: Option<String>,
}

/// Request body for stock mutation endpoints
#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub amount: i32,
}

/// Request body for the absolute quantity endpoint
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i32,
}

/// Query parameters for the unfiltered listing
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Sort field name; unknown fields are rejected
    pub sort: Option<String>,
    /// "ascending" (default) or "descending"
    pub direction: Option<String>,
}

/// Query parameters for the multi-criteria search
#[derive(Debug, Deserialize)]
pub struct SearchProductsQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_quantity: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 {
    20
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let draft = NewProduct {
        name: request.name,
        description: request.description,
        sku: request.sku,
        price: request.price,
        quantity: request.quantity,
        min_quantity: request.min_quantity,
        category: request.category,
        brand: request.brand,
        unit: request.unit,
    };

    let product = state.product_service.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.product_service.get_product(&ProductId(id)).await?;
    Ok(Json(product.into()))
}

/// GET /products/sku/:sku
pub async fn get_product_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.product_service.get_product_by_sku(&sku).await?;
    Ok(Json(product.into()))
}

/// PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let status = match request.status.as_deref() {
        Some(s) => s
            .parse::<ProductStatus>()
            .map_err(AppError::BadRequest)?,
        None => ProductStatus::Active,
    };

    let changes = UpdateProduct {
        name: request.name,
        description: request.description,
        sku: request.sku,
        price: request.price,
        quantity: request.quantity,
        min_quantity: request.min_quantity,
        category: request.category,
        brand: request.brand,
        unit: request.unit,
        status,
    };

    let product = state
        .product_service
        .update_product(&ProductId(id), changes)
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /products/:id (soft delete)
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.product_service.delete_product(&ProductId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/:id/permanent (hard delete)
pub async fn hard_delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .product_service
        .hard_delete_product(&ProductId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/:id/stock/add
pub async fn add_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .add_stock(&ProductId(id), request.amount)
        .await?;
    Ok(Json(product.into()))
}

/// POST /products/:id/stock/remove
pub async fn remove_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .remove_stock(&ProductId(id), request.amount)
        .await?;
    Ok(Json(product.into()))
}

/// PUT /products/:id/quantity
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .set_quantity(&ProductId(id), request.quantity)
        .await?;
    Ok(Json(product.into()))
}

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Page<ProductResponse>>, AppError> {
    let sort_field = match query.sort.as_deref() {
        Some(s) => s
            .parse::<ProductSortField>()
            .map_err(AppError::BadRequest)?,
        None => ProductSortField::default(),
    };
    let direction = match query.direction.as_deref() {
        Some(s) => s.parse::<SortDirection>().map_err(AppError::BadRequest)?,
        None => SortDirection::default(),
    };

    let page = state
        .product_service
        .list_products(query.page, query.page_size, sort_field, direction)
        .await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// GET /products/search
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchProductsQuery>,
) -> Result<Json<Page<ProductResponse>>, AppError> {
    let filter = ProductFilter {
        name: query.name,
        category: query.category,
        brand: query.brand,
        min_price: query.min_price,
        max_price: query.max_price,
        min_quantity: query.min_quantity,
    };

    let page = state
        .product_service
        .search_products(&filter, query.page, query.page_size)
        .await?;
    Ok(Json(page.map(ProductResponse::from)))
}
