use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::models::*;
use crate::seed::{self, SeedFixture, SeedOutcome};
use crate::views::{self, SortDir, SortKey, SortState, TaskFilter};

// ============================================================
// Error Handling
// ============================================================

/// Map a store error onto an HTTP response.
///
/// Validation and not-found errors carry messages safe to show the client.
/// Storage failures are logged in full server-side and reported with a
/// generic body so internal details never leak.
fn error_response(e: Error) -> (StatusCode, String) {
    match e {
        Error::Validation(msg) => {
            tracing::warn!("Validation error: {}", msg);
            (StatusCode::BAD_REQUEST, msg)
        }
        Error::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        Error::Storage(err) => {
            tracing::error!("Storage error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Features
// ============================================================

/// Query parameters for the feature listing.
#[derive(Debug, Deserialize)]
pub struct ListFeaturesQuery {
    /// Sort column. Without it the store's order (newest first) is kept.
    pub sort: Option<SortKey>,
    /// Sort direction. Defaults to descending when `sort` is present.
    pub dir: Option<SortDir>,
}

pub async fn list_features(
    State(db): State<Database>,
    Query(query): Query<ListFeaturesQuery>,
) -> Result<Json<Vec<Feature>>, (StatusCode, String)> {
    let features = db.get_all_features().map_err(error_response)?;

    let features = match query.sort {
        Some(key) => {
            let state = SortState::new(key, query.dir.unwrap_or(SortDir::Desc));
            views::sorted_features(features, state)
        }
        None => features,
    };

    Ok(Json(features))
}

pub async fn get_feature(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Feature>, (StatusCode, String)> {
    db.get_feature(id)
        .map_err(error_response)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "feature not found".to_string()))
}

pub async fn create_feature(
    State(db): State<Database>,
    Json(input): Json<CreateFeatureInput>,
) -> Result<(StatusCode, Json<Feature>), (StatusCode, String)> {
    db.create_feature(input)
        .map(|f| (StatusCode::CREATED, Json(f)))
        .map_err(error_response)
}

pub async fn update_feature(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFeatureInput>,
) -> Result<Json<Feature>, (StatusCode, String)> {
    db.update_feature(id, input).map(Json).map_err(error_response)
}

pub async fn delete_feature(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    db.delete_feature(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

pub async fn list_feature_tasks(
    State(db): State<Database>,
    Path(feature_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    db.get_tasks_by_feature(feature_id)
        .map(Json)
        .map_err(error_response)
}

// ============================================================
// Tasks
// ============================================================

/// Query parameters for the task listing. The literal value `all` on
/// either filter is the pass-through sentinel used by the board's pickers.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub assignee: Option<String>,
    pub priority: Option<String>,
}

fn task_filter(query: ListTasksQuery) -> Result<TaskFilter, (StatusCode, String)> {
    let assignee = query.assignee.filter(|a| a != "all");
    let priority = match query.priority.as_deref() {
        None | Some("all") => None,
        Some(p) => Some(TaskPriority::from_str(p).ok_or((
            StatusCode::BAD_REQUEST,
            format!("unknown priority: {p}"),
        ))?),
    };
    Ok(TaskFilter { assignee, priority })
}

pub async fn list_tasks(
    State(db): State<Database>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let filter = task_filter(query)?;
    let tasks = db.get_all_tasks().map_err(error_response)?;
    Ok(Json(views::filter_tasks(tasks, &filter)))
}

pub async fn get_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    db.get_task(id)
        .map_err(error_response)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "task not found".to_string()))
}

pub async fn create_task(
    State(db): State<Database>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    db.create_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(error_response)
}

pub async fn update_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, (StatusCode, String)> {
    db.update_task(id, input).map(Json).map_err(error_response)
}

pub async fn move_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<MoveTaskInput>,
) -> Result<StatusCode, (StatusCode, String)> {
    db.move_task(id, input.column)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

pub async fn delete_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    db.delete_task(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

// ============================================================
// Seed
// ============================================================

pub async fn seed(
    State(db): State<Database>,
) -> Result<Json<SeedOutcome>, (StatusCode, String)> {
    seed::seed(&db, &SeedFixture::demo())
        .map(Json)
        .map_err(error_response)
}
