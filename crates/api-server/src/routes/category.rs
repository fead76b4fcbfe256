//! Category API endpoints
//!
//! RESTful API for category CRUD operations under the /v1 prefix.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::category::Category;

use crate::error::ApiError;
use crate::state::AppState;

/// Body for both create and full-replace update
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub category_order: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DeleteCategoryResponse {
    pub message: String,
}

/// GET /v1/categories/ - List categories with nested tasks
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(10);
    let categories = state.categories().list(skip, limit)?;
    Ok(Json(categories))
}

/// GET /v1/categories/{id} - Get a single category
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .categories()
        .get(id)?
        .ok_or_else(|| ApiError::category_not_found(id))?;
    Ok(Json(category))
}

/// POST /v1/categories/ - Create a new category
async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryPayload>,
) -> Result<Json<Category>, ApiError> {
    let created = state.categories().create(&req.name, req.category_order)?;
    Ok(Json(created))
}

/// PUT /v1/categories/{id} - Replace a category's fields
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CategoryPayload>,
) -> Result<Json<Category>, ApiError> {
    let updated = state
        .categories()
        .update(id, &req.name, req.category_order)?
        .ok_or_else(|| ApiError::category_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /v1/categories/{id} - Delete a category and its tasks
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteCategoryResponse>, ApiError> {
    if !state.categories().delete(id)? {
        return Err(ApiError::category_not_found(id));
    }
    Ok(Json(DeleteCategoryResponse {
        message: format!("Category with ID: {id} is deleted"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/categories/", get(list_categories).post(create_category))
        .route(
            "/v1/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
