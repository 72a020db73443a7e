//! Category handlers
//!
//! JSON endpoints for category CRUD and lookup.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Category, CategoryId, CategoryStatus, NewCategory, UpdateCategory};
use crate::error::AppError;
use crate::AppState;

/// Response shape for a single category
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id.to_string(),
            name: c.name,
            description: c.description,
            status: c.status.to_string(),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a new category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request to update a category
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    /// "active" or "inactive"; defaults to active
    pub status: Option<String>,
}

/// Query parameters carrying a category name
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = state
        .category_service
        .create_category(NewCategory {
            name: request.name,
            description: request.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.all_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /categories/active
pub async fn list_active_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.active_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /categories/:id
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .category_service
        .get_category(&CategoryId(id))
        .await?;
    Ok(Json(category.into()))
}

/// GET /categories/name/:name
pub async fn get_category_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state.category_service.get_category_by_name(&name).await?;
    Ok(Json(category.into()))
}

/// PUT /categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let status = match request.status.as_deref() {
        Some(s) => s
            .parse::<CategoryStatus>()
            .map_err(AppError::BadRequest)?,
        None => CategoryStatus::Active,
    };

    let category = state
        .category_service
        .update_category(
            &CategoryId(id),
            UpdateCategory {
                name: request.name,
                description: request.description,
                status,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /categories/:id (soft delete)
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .category_service
        .delete_category(&CategoryId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /categories/:id/permanent (hard delete)
pub async fn hard_delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .category_service
        .hard_delete_category(&CategoryId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories/search?name=
pub async fn search_categories(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.search_categories(&query.name).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /categories/exists?name=
pub async fn category_exists(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ExistsResponse>, AppError> {
    let exists = state.category_service.category_exists(&query.name).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// GET /categories/count
pub async fn category_count(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.category_service.category_count().await?;
    Ok(Json(CountResponse { count }))
}
