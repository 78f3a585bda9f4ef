//! Goal CRUD and task assignment.

use super::Database;
use crate::error::{ApiError, EntityKind};
use crate::types::Goal;
use anyhow::Result;
use rusqlite::{Connection, Row, params};

fn parse_goal_row(row: &Row) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get("id")?,
        title: row.get("title")?,
    })
}

/// Fetch a goal using an existing connection (avoids re-locking the handle).
fn get_goal_internal(conn: &Connection, goal_id: i64) -> Result<Option<Goal>> {
    let mut stmt = conn.prepare("SELECT id, title FROM goal WHERE id = ?1")?;

    match stmt.query_row(params![goal_id], parse_goal_row) {
        Ok(goal) => Ok(Some(goal)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a new goal.
    pub fn create_goal(&self, title: &str) -> Result<Goal> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO goal (title) VALUES (?1)", params![title])?;

            Ok(Goal {
                id: conn.last_insert_rowid(),
                title: title.to_string(),
            })
        })
    }

    /// List all goals in id order.
    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, title FROM goal ORDER BY id")?;
            let goals = stmt
                .query_map([], parse_goal_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(goals)
        })
    }

    /// Fetch a single goal by id.
    pub fn get_goal(&self, goal_id: i64) -> Result<Option<Goal>> {
        self.with_conn(|conn| get_goal_internal(conn, goal_id))
    }

    /// Replace a goal's title. Returns `None` when the goal no longer exists.
    pub fn update_goal(&self, goal_id: i64, title: &str) -> Result<Option<Goal>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE goal SET title = ?1 WHERE id = ?2",
                params![title, goal_id],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            get_goal_internal(conn, goal_id)
        })
    }

    /// Delete a goal. Tasks that referenced it keep existing with their
    /// `goal_id` cleared by the schema's ON DELETE SET NULL.
    pub fn delete_goal(&self, goal_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM goal WHERE id = ?1", params![goal_id])?;
            Ok(changed > 0)
        })
    }

    /// Reassign every task in `task_ids` to the goal, overwriting any prior
    /// assignment.
    ///
    /// The batch commits atomically: an unknown task id aborts with its
    /// not-found error and the dropped transaction rolls back the staged
    /// reassignments.
    pub fn assign_tasks_to_goal(&self, goal_id: i64, task_ids: &[i64]) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            for &task_id in task_ids {
                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM task WHERE id = ?1)",
                    params![task_id],
                    |row| row.get(0),
                )?;
                if !exists {
                    return Err(ApiError::not_found(EntityKind::Task, task_id).into());
                }

                tx.execute(
                    "UPDATE task SET goal_id = ?1 WHERE id = ?2",
                    params![goal_id, task_id],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
    }
}
