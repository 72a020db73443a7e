//! Stockroom API Server
//!
//! Inventory management service: products grouped into categories, with
//! SKU-unique identity, stock mutation, filtered pagination and aggregate
//! reporting. Uses hexagonal (ports & adapters) architecture for clean
//! separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresCategoryRepository, PostgresProductRepository};
use app::{CategoryService, ProductService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<ProductService<PostgresProductRepository>>,
    pub category_service: Arc<CategoryService<PostgresCategoryRepository>>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stockroom_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stockroom API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let product_repo = Arc::new(PostgresProductRepository::new(db.clone()));
    let category_repo = Arc::new(PostgresCategoryRepository::new(db.clone()));

    // Create application services
    let product_service = Arc::new(ProductService::new(product_repo));
    let category_service = Arc::new(CategoryService::new(category_repo));

    let state = AppState {
        product_service,
        category_service,
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Products
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/products/search", get(handlers::search_products))
        .route("/products/sku/:sku", get(handlers::get_product_by_sku))
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/products/:id/permanent",
            delete(handlers::hard_delete_product),
        )
        .route("/products/:id/stock/add", post(handlers::add_stock))
        .route("/products/:id/stock/remove", post(handlers::remove_stock))
        .route("/products/:id/quantity", put(handlers::set_quantity))
        // Reports
        .route("/reports/low-stock", get(handlers::low_stock))
        .route("/reports/out-of-stock", get(handlers::out_of_stock))
        .route("/reports/inventory-value", get(handlers::inventory_value))
        .route(
            "/reports/products-by-category",
            get(handlers::products_by_category),
        )
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/active", get(handlers::list_active_categories))
        .route("/categories/search", get(handlers::search_categories))
        .route("/categories/exists", get(handlers::category_exists))
        .route("/categories/count", get(handlers::category_count))
        .route("/categories/name/:name", get(handlers::get_category_by_name))
        .route(
            "/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/categories/:id/permanent",
            delete(handlers::hard_delete_category),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
