//! Task endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use super::{ApiServer, require_body, resolve};
use crate::db::now_ms;
use crate::error::{ApiError, ApiResult, EntityKind};
use crate::types::{DeleteConfirmation, TaskEnvelope, TaskPayload, TaskView};

/// Query parameters for the task list.
#[derive(Debug, Deserialize)]
pub(super) struct ListTasksParams {
    sort: Option<String>,
}

pub(super) async fn create_task(
    State(state): State<ApiServer>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskEnvelope>)> {
    let payload = require_body(body)?;
    let title = payload.title.as_deref().ok_or(ApiError::InvalidPayload)?;
    let description = payload
        .description
        .as_deref()
        .ok_or(ApiError::InvalidPayload)?;

    let task = state
        .db()
        .create_task(title, description, payload.completed_at_ms())?;

    Ok((
        StatusCode::CREATED,
        Json(TaskEnvelope {
            task: TaskView::summary(&task),
        }),
    ))
}

pub(super) async fn list_tasks(
    State(state): State<ApiServer>,
    Query(params): Query<ListTasksParams>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = state.db().list_tasks(params.sort.as_deref())?;
    Ok(Json(tasks.iter().map(TaskView::summary).collect()))
}

pub(super) async fn get_one_task(
    State(state): State<ApiServer>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskEnvelope>> {
    let task = resolve(EntityKind::Task, &task_id, |id| state.db().get_task(id))?;

    Ok(Json(TaskEnvelope {
        task: TaskView::detail(&task),
    }))
}

pub(super) async fn update_task(
    State(state): State<ApiServer>,
    Path(task_id): Path<String>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let task = resolve(EntityKind::Task, &task_id, |id| state.db().get_task(id))?;

    let payload = require_body(body)?;
    let title = payload.title.as_deref().ok_or(ApiError::InvalidPayload)?;
    let description = payload
        .description
        .as_deref()
        .ok_or(ApiError::InvalidPayload)?;

    // Full-replace semantics: an absent completed_at clears any completion.
    let updated = state
        .db()
        .update_task(task.id, title, description, payload.completed_at_ms())?
        .ok_or_else(|| ApiError::not_found(EntityKind::Task, task.id))?;

    Ok(Json(TaskEnvelope {
        task: TaskView::summary(&updated),
    }))
}

pub(super) async fn delete_task(
    State(state): State<ApiServer>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let task = resolve(EntityKind::Task, &task_id, |id| state.db().get_task(id))?;
    state.db().delete_task(task.id)?;

    Ok(Json(DeleteConfirmation {
        details: format!("Task {} \"{}\" successfully deleted", task.id, task.title),
    }))
}

pub(super) async fn mark_complete(
    State(state): State<ApiServer>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskEnvelope>> {
    let task = resolve(EntityKind::Task, &task_id, |id| state.db().get_task(id))?;

    let updated = state
        .db()
        .set_task_completed(task.id, Some(now_ms()))?
        .ok_or_else(|| ApiError::not_found(EntityKind::Task, task.id))?;

    // The row is committed before the notice goes out; delivery never
    // affects the response.
    if let Some(notifier) = state.notifier() {
        notifier.task_completed(&updated.title);
    } else {
        tracing::debug!(task_id = updated.id, "completion notice skipped (notifier disabled)");
    }

    Ok(Json(TaskEnvelope {
        task: TaskView::summary(&updated),
    }))
}

pub(super) async fn mark_incomplete(
    State(state): State<ApiServer>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskEnvelope>> {
    let task = resolve(EntityKind::Task, &task_id, |id| state.db().get_task(id))?;

    let updated = state
        .db()
        .set_task_completed(task.id, None)?
        .ok_or_else(|| ApiError::not_found(EntityKind::Task, task.id))?;

    Ok(Json(TaskEnvelope {
        task: TaskView::summary(&updated),
    }))
}
