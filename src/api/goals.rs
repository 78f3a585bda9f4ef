//! Goal endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiServer, require_body, resolve};
use crate::error::{ApiError, ApiResult, EntityKind};
use crate::types::{
    AssignTasksPayload, AssignTasksResponse, DeleteConfirmation, GoalEnvelope, GoalPayload,
    GoalTasksResponse, GoalView, TaskView,
};

pub(super) async fn create_goal(
    State(state): State<ApiServer>,
    body: Result<Json<GoalPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GoalEnvelope>)> {
    let payload = require_body(body)?;
    let title = payload.title.as_deref().ok_or(ApiError::InvalidPayload)?;

    let goal = state.db().create_goal(title)?;

    Ok((
        StatusCode::CREATED,
        Json(GoalEnvelope {
            goal: GoalView::from(&goal),
        }),
    ))
}

pub(super) async fn list_goals(
    State(state): State<ApiServer>,
) -> ApiResult<Json<Vec<GoalView>>> {
    let goals = state.db().list_goals()?;
    Ok(Json(goals.iter().map(GoalView::from).collect()))
}

pub(super) async fn get_one_goal(
    State(state): State<ApiServer>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<GoalEnvelope>> {
    let goal = resolve(EntityKind::Goal, &goal_id, |id| state.db().get_goal(id))?;

    Ok(Json(GoalEnvelope {
        goal: GoalView::from(&goal),
    }))
}

pub(super) async fn update_goal(
    State(state): State<ApiServer>,
    Path(goal_id): Path<String>,
    body: Result<Json<GoalPayload>, JsonRejection>,
) -> ApiResult<Json<GoalEnvelope>> {
    let goal = resolve(EntityKind::Goal, &goal_id, |id| state.db().get_goal(id))?;

    let payload = require_body(body)?;
    let title = payload.title.as_deref().ok_or(ApiError::InvalidPayload)?;

    let updated = state
        .db()
        .update_goal(goal.id, title)?
        .ok_or_else(|| ApiError::not_found(EntityKind::Goal, goal.id))?;

    Ok(Json(GoalEnvelope {
        goal: GoalView::from(&updated),
    }))
}

pub(super) async fn delete_goal(
    State(state): State<ApiServer>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let goal = resolve(EntityKind::Goal, &goal_id, |id| state.db().get_goal(id))?;
    state.db().delete_goal(goal.id)?;

    Ok(Json(DeleteConfirmation {
        details: format!("Goal {} \"{}\" successfully deleted", goal.id, goal.title),
    }))
}

pub(super) async fn assign_tasks(
    State(state): State<ApiServer>,
    Path(goal_id): Path<String>,
    body: Result<Json<AssignTasksPayload>, JsonRejection>,
) -> ApiResult<Json<AssignTasksResponse>> {
    let goal = resolve(EntityKind::Goal, &goal_id, |id| state.db().get_goal(id))?;

    let payload = require_body(body)?;
    let task_ids = payload.task_ids.unwrap_or_default();
    if task_ids.is_empty() {
        return Err(ApiError::MissingTaskIds);
    }

    state.db().assign_tasks_to_goal(goal.id, &task_ids)?;

    Ok(Json(AssignTasksResponse {
        id: goal.id,
        task_ids,
    }))
}

pub(super) async fn tasks_of_goal(
    State(state): State<ApiServer>,
    Path(goal_id): Path<String>,
) -> ApiResult<Json<GoalTasksResponse>> {
    let goal = resolve(EntityKind::Goal, &goal_id, |id| state.db().get_goal(id))?;

    let tasks = state.db().tasks_of_goal(goal.id)?;

    Ok(Json(GoalTasksResponse {
        id: goal.id,
        title: goal.title,
        tasks: tasks
            .iter()
            .map(|task| TaskView::of_goal(task, goal.id))
            .collect(),
    }))
}
