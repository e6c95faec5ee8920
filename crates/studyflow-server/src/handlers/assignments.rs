//! Handlers for `/assignments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assignments` | `?status_filter=&course_code=&priority=` |
//! | `POST`   | `/assignments` | Course must be enrolled; starts `pending` |
//! | `GET`    | `/assignments/{id}` | 404 if absent or someone else's |
//! | `PUT`    | `/assignments/{id}` | Partial update |
//! | `DELETE` | `/assignments/{id}` | |
//! | `GET`    | `/assignments/summary/stats` | Counts by status and due date |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use studyflow_core::{
  assignment::{
    Assignment, AssignmentFilter, AssignmentPatch, AssignmentStats, AssignmentStatus,
    NewAssignment, Priority,
  },
  store::AssignmentStore,
};
use uuid::Uuid;

use crate::{AppState, auth::CurrentAccount, error::ApiError};

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> ApiError {
  ApiError::Store(Box::new(e))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  #[serde(alias = "status")]
  pub status_filter: Option<AssignmentStatus>,
  pub course_code:   Option<String>,
  pub priority:      Option<Priority>,
}

/// `GET /assignments`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Assignment>>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let filter = AssignmentFilter {
    status:      params.status_filter,
    course_code: params.course_code,
    priority:    params.priority,
  };
  let assignments = state
    .assignments
    .list(account.id, filter)
    .await
    .map_err(store_err)?;
  Ok(Json(assignments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /assignments`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Json(body): Json<NewAssignment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  if body.title.trim().is_empty() {
    return Err(ApiError::BadRequest("title must not be empty".into()));
  }
  if !account.is_enrolled(&body.course_code) {
    return Err(studyflow_engine::Error::NotEnrolled(body.course_code).into());
  }

  let assignment = state
    .assignments
    .create(account.id, body)
    .await
    .map_err(store_err)?;
  tracing::info!(
    account_id = %account.id,
    assignment_id = %assignment.id,
    course_code = %assignment.course_code,
    "created assignment"
  );
  Ok((StatusCode::CREATED, Json(assignment)))
}

// ─── Get / update / delete ────────────────────────────────────────────────────

/// `GET /assignments/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(id): Path<Uuid>,
) -> Result<Json<Assignment>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let assignment = state
    .assignments
    .get(account.id, id)
    .await
    .map_err(store_err)?
    .ok_or(ApiError::AssignmentNotFound(id))?;
  Ok(Json(assignment))
}

/// `PUT /assignments/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(id): Path<Uuid>,
  Json(patch): Json<AssignmentPatch>,
) -> Result<Json<Assignment>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
    return Err(ApiError::BadRequest("title must not be empty".into()));
  }
  let assignment = state
    .assignments
    .update(account.id, id, patch)
    .await
    .map_err(store_err)?
    .ok_or(ApiError::AssignmentNotFound(id))?;
  Ok(Json(assignment))
}

/// `DELETE /assignments/{id}`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let removed = state
    .assignments
    .delete(account.id, id)
    .await
    .map_err(store_err)?;
  if !removed {
    return Err(ApiError::AssignmentNotFound(id));
  }
  Ok(Json(json!({ "message": "Assignment deleted" })))
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /assignments/summary/stats`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<Json<AssignmentStats>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let all = state
    .assignments
    .list(account.id, AssignmentFilter::default())
    .await
    .map_err(store_err)?;
  Ok(Json(AssignmentStats::compute(&all, Utc::now().date_naive())))
}
