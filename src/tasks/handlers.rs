use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, FieldError},
    state::AppState,
};

use super::dto::{CreateTaskRequest, DeleteResponse, ListTasksQuery, UpdateTaskRequest};
use super::repo_types::Task;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks))
        .route("/tasks/:id", get(get_task))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(create_task))
        .route("/tasks/:id", put(update_task).delete(delete_task))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "title",
            "Title is required",
        )]));
    }

    let task = Task::create(
        &state.db,
        user_id,
        payload.title.trim(),
        payload.description.as_deref(),
        payload.completed,
    )
    .await?;

    info!(task_id = %task.id, owner_id = %user_id, "task created");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks =
        Task::list_by_owner(&state.db, user_id, query.q.as_deref(), query.completed).await?;
    Ok(Json(tasks))
}

#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = Task::find_by_id(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;
    Ok(Json(task))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation(vec![FieldError::new(
                "title",
                "Title is required",
            )]));
        }
    }

    let task = Task::update(
        &state.db,
        user_id,
        id,
        payload.title.as_deref().map(str::trim),
        payload.description.as_deref(),
        payload.completed,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    info!(task_id = %task.id, owner_id = %user_id, "task updated");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = Task::delete(&state.db, user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".into()));
    }

    info!(task_id = %id, owner_id = %user_id, "task deleted");
    Ok(Json(DeleteResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn task_serialization_keeps_optional_description_null() {
        let task = Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Ship release".into(),
            description: None,
            completed: false,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""description":null"#));
        assert!(json.contains(r#""completed":false"#));
    }

    #[test]
    fn empty_title_is_a_field_error() {
        let err = ApiError::Validation(vec![FieldError::new("title", "Title is required")]);
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
