//! Task CRUD and queries.

use super::Database;
use crate::types::Task;
use anyhow::Result;
use rusqlite::{Connection, Row, params};

/// Build an ORDER BY clause from the list sort parameter.
///
/// `asc` and `desc` sort by title; any other value (including absent)
/// falls back to id order.
fn order_clause(sort: Option<&str>) -> &'static str {
    match sort {
        Some("asc") => "title ASC",
        Some("desc") => "title DESC",
        _ => "id ASC",
    }
}

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed_at: row.get("completed_at")?,
        goal_id: row.get("goal_id")?,
    })
}

/// Fetch a task using an existing connection (avoids re-locking the handle).
fn get_task_internal(conn: &Connection, task_id: i64) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM task WHERE id = ?1")?;

    match stmt.query_row(params![task_id], parse_task_row) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a new task. `completed_at` is epoch milliseconds when the
    /// caller supplies an initial completion timestamp.
    pub fn create_task(
        &self,
        title: &str,
        description: &str,
        completed_at: Option<i64>,
    ) -> Result<Task> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO task (title, description, completed_at) VALUES (?1, ?2, ?3)",
                params![title, description, completed_at],
            )?;

            Ok(Task {
                id: conn.last_insert_rowid(),
                title: title.to_string(),
                description: description.to_string(),
                completed_at,
                goal_id: None,
            })
        })
    }

    /// List all tasks in the order selected by the sort parameter.
    pub fn list_tasks(&self, sort: Option<&str>) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT * FROM task ORDER BY {}", order_clause(sort));
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id))
    }

    /// Replace a task's title, description and completion timestamp.
    /// The goal assignment is left untouched. Returns `None` when the task
    /// no longer exists.
    pub fn update_task(
        &self,
        task_id: i64,
        title: &str,
        description: &str,
        completed_at: Option<i64>,
    ) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE task SET title = ?1, description = ?2, completed_at = ?3 WHERE id = ?4",
                params![title, description, completed_at, task_id],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            get_task_internal(conn, task_id)
        })
    }

    /// Delete a task. Returns true when a row was removed.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM task WHERE id = ?1", params![task_id])?;
            Ok(changed > 0)
        })
    }

    /// Set or clear a task's completion timestamp. Returns `None` when the
    /// task no longer exists.
    pub fn set_task_completed(
        &self,
        task_id: i64,
        completed_at: Option<i64>,
    ) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE task SET completed_at = ?1 WHERE id = ?2",
                params![completed_at, task_id],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            get_task_internal(conn, task_id)
        })
    }

    /// Tasks currently assigned to a goal, in id order.
    pub fn tasks_of_goal(&self, goal_id: i64) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM task WHERE goal_id = ?1 ORDER BY id")?;
            let tasks = stmt
                .query_map(params![goal_id], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }
}
