//! Integration tests for the database layer.
//!
//! These tests verify the store operations using an in-memory SQLite database.

use tasklist_api::db::Database;
use tasklist_api::error::{ApiError, EntityKind};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

mod task_tests {
    use super::*;

    #[test]
    fn create_task_assigns_fresh_ids() {
        let db = setup_db();

        let first = db
            .create_task("Water the plants", "Both rooms", None)
            .expect("Failed to create task");
        let second = db
            .create_task("Buy groceries", "Milk and bread", None)
            .expect("Failed to create task");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.completed_at.is_none());
        assert!(first.goal_id.is_none());
    }

    #[test]
    fn create_task_with_initial_completion() {
        let db = setup_db();

        let task = db
            .create_task("Ship release", "Tag and publish", Some(1_731_009_017_000))
            .unwrap();

        assert_eq!(task.completed_at, Some(1_731_009_017_000));
        assert!(task.is_complete());

        let fetched = db.get_task(task.id).unwrap().expect("task exists");
        assert_eq!(fetched.completed_at, Some(1_731_009_017_000));
    }

    #[test]
    fn get_task_returns_none_for_unknown_id() {
        let db = setup_db();

        assert!(db.get_task(999).unwrap().is_none());
    }

    #[test]
    fn list_tasks_defaults_to_id_order() {
        let db = setup_db();
        db.create_task("banana", "b", None).unwrap();
        db.create_task("apple", "a", None).unwrap();
        db.create_task("cherry", "c", None).unwrap();

        let titles: Vec<String> = db
            .list_tasks(None)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["banana", "apple", "cherry"]);
    }

    #[test]
    fn list_tasks_sorts_by_title_ascending() {
        let db = setup_db();
        db.create_task("banana", "b", None).unwrap();
        db.create_task("apple", "a", None).unwrap();
        db.create_task("cherry", "c", None).unwrap();

        let titles: Vec<String> = db
            .list_tasks(Some("asc"))
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn list_tasks_sorts_by_title_descending() {
        let db = setup_db();
        db.create_task("banana", "b", None).unwrap();
        db.create_task("apple", "a", None).unwrap();
        db.create_task("cherry", "c", None).unwrap();

        let titles: Vec<String> = db
            .list_tasks(Some("desc"))
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["cherry", "banana", "apple"]);
    }

    #[test]
    fn list_tasks_ignores_unknown_sort_values() {
        let db = setup_db();
        db.create_task("banana", "b", None).unwrap();
        db.create_task("apple", "a", None).unwrap();

        let titles: Vec<String> = db
            .list_tasks(Some("priority"))
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["banana", "apple"]);
    }

    #[test]
    fn update_task_replaces_all_fields() {
        let db = setup_db();
        let task = db
            .create_task("Draft", "First pass", Some(1_000))
            .unwrap();

        let updated = db
            .update_task(task.id, "Final", "Second pass", None)
            .unwrap()
            .expect("task exists");

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, "Second pass");
        // Full replace: an absent timestamp clears completion
        assert!(updated.completed_at.is_none());
    }

    #[test]
    fn update_task_preserves_goal_assignment() {
        let db = setup_db();
        let goal = db.create_goal("Chores").unwrap();
        let task = db.create_task("Sweep", "Kitchen", None).unwrap();
        db.assign_tasks_to_goal(goal.id, &[task.id]).unwrap();

        let updated = db
            .update_task(task.id, "Sweep", "Kitchen and hall", None)
            .unwrap()
            .expect("task exists");

        assert_eq!(updated.goal_id, Some(goal.id));
    }

    #[test]
    fn update_missing_task_returns_none() {
        let db = setup_db();

        assert!(db.update_task(42, "x", "y", None).unwrap().is_none());
    }

    #[test]
    fn set_task_completed_round_trip() {
        let db = setup_db();
        let task = db.create_task("Stretch", "Five minutes", None).unwrap();

        let completed = db
            .set_task_completed(task.id, Some(5_000))
            .unwrap()
            .expect("task exists");
        assert!(completed.is_complete());
        assert_eq!(completed.completed_at, Some(5_000));

        let reverted = db
            .set_task_completed(task.id, None)
            .unwrap()
            .expect("task exists");
        assert!(!reverted.is_complete());
    }

    #[test]
    fn delete_task_removes_record() {
        let db = setup_db();
        let task = db.create_task("Temporary", "Gone soon", None).unwrap();

        assert!(db.delete_task(task.id).unwrap());
        assert!(db.get_task(task.id).unwrap().is_none());
        assert!(!db.delete_task(task.id).unwrap());
    }
}

mod goal_tests {
    use super::*;

    #[test]
    fn create_goal_assigns_fresh_ids() {
        let db = setup_db();

        let first = db.create_goal("Health").unwrap();
        let second = db.create_goal("Career").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn list_goals_in_id_order() {
        let db = setup_db();
        db.create_goal("Zeta").unwrap();
        db.create_goal("Alpha").unwrap();

        let titles: Vec<String> = db
            .list_goals()
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();

        assert_eq!(titles, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn update_goal_replaces_title() {
        let db = setup_db();
        let goal = db.create_goal("Helth").unwrap();

        let updated = db
            .update_goal(goal.id, "Health")
            .unwrap()
            .expect("goal exists");

        assert_eq!(updated.title, "Health");
    }

    #[test]
    fn update_missing_goal_returns_none() {
        let db = setup_db();

        assert!(db.update_goal(42, "x").unwrap().is_none());
    }

    #[test]
    fn delete_goal_clears_task_assignments() {
        let db = setup_db();
        let goal = db.create_goal("Spring cleaning").unwrap();
        let task_a = db.create_task("Windows", "All of them", None).unwrap();
        let task_b = db.create_task("Floors", "Mop twice", None).unwrap();
        db.assign_tasks_to_goal(goal.id, &[task_a.id, task_b.id])
            .unwrap();

        assert!(db.delete_goal(goal.id).unwrap());

        // Tasks survive, orphaned by ON DELETE SET NULL
        let task_a = db.get_task(task_a.id).unwrap().expect("task survives");
        let task_b = db.get_task(task_b.id).unwrap().expect("task survives");
        assert!(task_a.goal_id.is_none());
        assert!(task_b.goal_id.is_none());
    }

    #[test]
    fn delete_goal_returns_false_for_unknown_id() {
        let db = setup_db();

        assert!(!db.delete_goal(999).unwrap());
    }
}

mod assignment_tests {
    use super::*;

    #[test]
    fn assign_tasks_sets_goal_id_on_each() {
        let db = setup_db();
        let goal = db.create_goal("Garden").unwrap();
        let task_a = db.create_task("Weed", "Front bed", None).unwrap();
        let task_b = db.create_task("Water", "Back bed", None).unwrap();

        db.assign_tasks_to_goal(goal.id, &[task_a.id, task_b.id])
            .unwrap();

        let assigned = db.tasks_of_goal(goal.id).unwrap();
        assert_eq!(assigned.len(), 2);
        assert!(assigned.iter().all(|t| t.goal_id == Some(goal.id)));
    }

    #[test]
    fn assign_tasks_overwrites_prior_assignment() {
        let db = setup_db();
        let old_goal = db.create_goal("Old").unwrap();
        let new_goal = db.create_goal("New").unwrap();
        let task = db.create_task("Move me", "Across goals", None).unwrap();

        db.assign_tasks_to_goal(old_goal.id, &[task.id]).unwrap();
        db.assign_tasks_to_goal(new_goal.id, &[task.id]).unwrap();

        assert!(db.tasks_of_goal(old_goal.id).unwrap().is_empty());
        let moved = db.tasks_of_goal(new_goal.id).unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, task.id);
    }

    #[test]
    fn assign_unknown_task_rolls_back_everything() {
        let db = setup_db();
        let goal = db.create_goal("Doomed batch").unwrap();
        let task = db.create_task("Valid", "Exists", None).unwrap();

        let err = db
            .assign_tasks_to_goal(goal.id, &[task.id, 999])
            .unwrap_err();

        let api_err = ApiError::from(err);
        assert!(matches!(
            api_err,
            ApiError::NotFound {
                kind: EntityKind::Task,
                id: 999
            }
        ));

        // The valid task was staged before the failure and must be rolled back
        let task = db.get_task(task.id).unwrap().expect("task exists");
        assert!(task.goal_id.is_none());
        assert!(db.tasks_of_goal(goal.id).unwrap().is_empty());
    }

    #[test]
    fn tasks_of_goal_ordered_by_id() {
        let db = setup_db();
        let goal = db.create_goal("Ordered").unwrap();
        let task_a = db.create_task("zebra", "z", None).unwrap();
        let task_b = db.create_task("aardvark", "a", None).unwrap();

        db.assign_tasks_to_goal(goal.id, &[task_b.id, task_a.id])
            .unwrap();

        let ids: Vec<i64> = db
            .tasks_of_goal(goal.id)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![task_a.id, task_b.id]);
    }

    #[test]
    fn tasks_of_goal_is_empty_for_fresh_goal() {
        let db = setup_db();
        let goal = db.create_goal("Empty").unwrap();

        assert!(db.tasks_of_goal(goal.id).unwrap().is_empty());
    }
}

mod persistence_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reopen_preserves_rows_across_migrations() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("tasks.db");

        {
            let db = Database::open(&path).expect("open database");
            let goal = db.create_goal("Persisted").unwrap();
            let task = db.create_task("Survive restart", "On disk", None).unwrap();
            db.assign_tasks_to_goal(goal.id, &[task.id]).unwrap();
        }

        let db = Database::open(&path).expect("reopen database");
        let task = db.get_task(1).unwrap().expect("task persisted");
        assert_eq!(task.title, "Survive restart");
        assert_eq!(task.goal_id, Some(1));
    }
}
