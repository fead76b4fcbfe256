//! Task API endpoints
//!
//! Tasks are created under a category; updates carry the full field set
//! including the owning category, so a task can be dragged between
//! categories with a single PUT.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::task::Task;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub task_order: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub task_order: i64,
    pub category_id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub id: i64,
    pub category_id: i64,
    pub message: String,
}

/// GET /v1/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks()
        .get(id)?
        .ok_or_else(|| ApiError::task_not_found(id))?;
    Ok(Json(task))
}

/// POST /v1/categories/{category_id}/tasks/ - Create a task under a category
async fn create_task(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if state.categories().get(category_id)?.is_none() {
        return Err(ApiError::category_not_found(category_id));
    }
    let task = state
        .tasks()
        .create(&req.title, &req.description, req.task_order, category_id)?;
    Ok(Json(task))
}

/// PUT /v1/tasks/{id} - Replace a task's fields
///
/// The store re-validates the target category itself; an unknown
/// `category_id` surfaces as a 404 through the error boundary.
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let updated = state
        .tasks()
        .update(id, &req.title, &req.description, req.task_order, req.category_id)?
        .ok_or_else(|| ApiError::task_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /v1/tasks/{id} - Delete a task, echoing its owning category
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let category_id = state
        .tasks()
        .delete(id)?
        .ok_or_else(|| ApiError::task_not_found(id))?;
    Ok(Json(DeleteTaskResponse {
        id,
        category_id,
        message: format!("Task with ID: {id} is deleted"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/v1/categories/{category_id}/tasks/", post(create_task))
}
