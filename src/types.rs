//! Core types for the task-list API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item.
///
/// `completed_at` is epoch milliseconds; its presence alone drives the
/// derived completion flag. `goal_id` links the task to at most one goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed_at: Option<i64>,
    pub goal_id: Option<i64>,
}

impl Task {
    /// Derived completion state. Never stored directly.
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A named grouping of zero or more tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
}

/// Request body for task create and update.
///
/// All fields are optional so handlers can report a missing required field
/// as an invalid payload rather than a body decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskPayload {
    /// Completion timestamp in the stored representation (epoch ms).
    pub fn completed_at_ms(&self) -> Option<i64> {
        self.completed_at.map(|ts| ts.timestamp_millis())
    }
}

/// Request body for goal create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPayload {
    pub title: Option<String>,
}

/// Request body for bulk task assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignTasksPayload {
    pub task_ids: Option<Vec<i64>>,
}

/// Task as rendered in responses.
///
/// `goal_id` is omitted entirely (not serialized as null) when absent.
/// Which constructor applies depends on the endpoint: task listings and
/// write responses never disclose the goal link, single-task reads disclose
/// it only when set, and goal task listings always carry the owning goal's
/// id.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub is_complete: bool,
}

impl TaskView {
    /// Summary shape used by task listings and write responses.
    pub fn summary(task: &Task) -> Self {
        Self {
            id: task.id,
            goal_id: None,
            title: task.title.clone(),
            description: task.description.clone(),
            is_complete: task.is_complete(),
        }
    }

    /// Detail shape for single-task reads.
    pub fn detail(task: &Task) -> Self {
        Self {
            goal_id: task.goal_id,
            ..Self::summary(task)
        }
    }

    /// Shape used when listing the tasks of a goal.
    pub fn of_goal(task: &Task, goal_id: i64) -> Self {
        Self {
            goal_id: Some(goal_id),
            ..Self::summary(task)
        }
    }
}

/// Goal as rendered in responses.
#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub id: i64,
    pub title: String,
}

impl From<&Goal> for GoalView {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            title: goal.title.clone(),
        }
    }
}

/// `{"task": ...}` envelope for single-task responses.
#[derive(Debug, Serialize)]
pub struct TaskEnvelope {
    pub task: TaskView,
}

/// `{"goal": ...}` envelope for single-goal responses.
#[derive(Debug, Serialize)]
pub struct GoalEnvelope {
    pub goal: GoalView,
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub details: String,
}

/// Response for bulk task assignment.
#[derive(Debug, Serialize)]
pub struct AssignTasksResponse {
    pub id: i64,
    pub task_ids: Vec<i64>,
}

/// Response for listing the tasks of a goal.
#[derive(Debug, Serialize)]
pub struct GoalTasksResponse {
    pub id: i64,
    pub title: String,
    pub tasks: Vec<TaskView>,
}
