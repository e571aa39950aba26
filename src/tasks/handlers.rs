use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::ApiError,
    state::AppState,
    tasks::{
        dto::{CreateTaskRequest, TaskResponse, UpdateStatusRequest, UpdateTaskRequest},
        repo,
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/employee/:id", get(list_employee_tasks))
        .route(
            "/tasks/:id",
            put(update_task).patch(update_task_status).delete(delete_task),
        )
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    _: AdminUser,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = repo::list_all(&state.db).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /tasks/employee/:id. The path id is deliberately not cross-checked
/// against the caller: any authenticated user may read any task list.
#[instrument(skip(state))]
pub async fn list_employee_tasks(
    State(state): State<AppState>,
    _: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = repo::list_for_employee(&state.db, id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    if payload.title.trim().is_empty() {
        warn!("task title empty");
        return Err(ApiError::BadRequest("Title is required".into()));
    }

    let task = repo::create(
        &state.db,
        &payload.title,
        &payload.description,
        payload.assigned_to,
        payload.status,
    )
    .await?;

    info!(task_id = %task.id, assigned_to = %payload.assigned_to, admin = %claims.sub, "task created");
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    if payload.title.trim().is_empty() {
        warn!(task_id = %id, "task title empty");
        return Err(ApiError::BadRequest("Title is required".into()));
    }

    let task = repo::update_full(
        &state.db,
        id,
        &payload.title,
        &payload.description,
        payload.assigned_to,
        payload.status,
    )
    .await?
    .ok_or(ApiError::NotFound("Task"))?;

    info!(task_id = %task.id, admin = %claims.sub, "task updated");
    Ok(Json(TaskResponse::from(task)))
}

/// PATCH /tasks/:id. Open to any authenticated user, not just the assignee.
#[instrument(skip(state, payload))]
pub async fn update_task_status(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = repo::update_status(&state.db, id, payload.status)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    info!(task_id = %task.id, status = ?payload.status, user = %claims.sub, "task status updated");
    Ok(Json(TaskResponse::from(task)))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repo::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    info!(task_id = %id, admin = %claims.sub, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
