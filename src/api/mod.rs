//! HTTP surface for the task-list API.
//!
//! This module provides the axum-based server: routes map one-to-one onto
//! the task and goal services, handlers resolve path identifiers through
//! [`resolve`], and every response is an explicit view type.

mod goals;
mod tasks;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, patch, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;
use crate::error::{ApiError, ApiResult, EntityKind};
use crate::notify::Notifier;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct ApiServer {
    /// Reference to the task database.
    db: Arc<Database>,
    /// Completion notifier; `None` disables notices.
    notifier: Option<Arc<Notifier>>,
}

impl ApiServer {
    /// Create a new server state.
    pub fn new(db: Arc<Database>, notifier: Option<Arc<Notifier>>) -> Self {
        Self { db, notifier }
    }

    /// Get the database reference.
    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }

    /// Get the notifier, when configured.
    pub fn notifier(&self) -> Option<&Arc<Notifier>> {
        self.notifier.as_ref()
    }
}

/// Resolve a raw path identifier into a persisted record.
///
/// Parses the segment as an integer (failure is a 400 invalid-identifier
/// error), then runs the lookup (absence is a 404). Shared by both entity
/// kinds; read-only.
pub(crate) fn resolve<T>(
    kind: EntityKind,
    raw: &str,
    lookup: impl FnOnce(i64) -> anyhow::Result<Option<T>>,
) -> ApiResult<T> {
    let id = raw
        .parse::<i64>()
        .map_err(|_| ApiError::invalid_identifier(kind, raw))?;
    lookup(id)?.ok_or_else(|| ApiError::not_found(kind, id))
}

/// Unwrap a JSON body, folding decode failures into the invalid-payload
/// error so callers see the same 400 as for a missing field.
pub(crate) fn require_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(payload)| payload)
        .map_err(|_| ApiError::InvalidPayload)
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes.
pub fn build_router(state: ApiServer) -> Router {
    // Permissive CORS; the API carries no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route(
            "/tasks/{task_id}",
            get(tasks::get_one_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{task_id}/mark_complete", patch(tasks::mark_complete))
        .route(
            "/tasks/{task_id}/mark_incomplete",
            patch(tasks::mark_incomplete),
        )
        .route("/goals", post(goals::create_goal).get(goals::list_goals))
        .route(
            "/goals/{goal_id}",
            get(goals::get_one_goal)
                .put(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route(
            "/goals/{goal_id}/tasks",
            post(goals::assign_tasks).get(goals::tasks_of_goal),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on the given port until the process receives ctrl-c.
pub async fn serve(state: ApiServer, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_non_integer_identifiers() {
        let err = resolve(EntityKind::Task, "abc", |_| Ok(Some(()))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier { .. }));
        assert_eq!(err.to_string(), "task abc invalid");
    }

    #[test]
    fn resolve_reports_missing_records() {
        let err = resolve(EntityKind::Goal, "12", |_| Ok(None::<()>)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound {
                kind: EntityKind::Goal,
                id: 12
            }
        ));
    }

    #[test]
    fn resolve_passes_parsed_id_to_lookup() {
        let found = resolve(EntityKind::Task, "7", |id| Ok(Some(id))).unwrap();
        assert_eq!(found, 7);
    }

    #[test]
    fn health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
