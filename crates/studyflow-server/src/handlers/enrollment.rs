//! Handlers for the enrollment ledger.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/user/enroll/{course_code}` | 404 unknown course, 409 already enrolled |
//! | `DELETE` | `/user/unenroll/{course_code}` | 409 if not enrolled; drops the course's calendar entries |
//! | `GET`    | `/user/courses` | Enrolled courses resolved through the catalog |

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};
use studyflow_core::store::AssignmentStore;

use crate::{AppState, auth::CurrentAccount, error::ApiError};

/// `POST /user/enroll/{course_code}`
pub async fn enroll<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(course_code): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let updated = state.planner.enroll(account.id, &course_code).await?;
  Ok(Json(json!({
    "message":          format!("Successfully enrolled in {course_code}"),
    "course_code":      course_code,
    "enrolled_courses": updated.enrolled_courses,
  })))
}

/// `DELETE /user/unenroll/{course_code}`
pub async fn unenroll<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(course_code): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let updated = state.planner.unenroll(account.id, &course_code).await?;
  Ok(Json(json!({
    "message":          format!("Successfully unenrolled from {course_code}"),
    "enrolled_courses": updated.enrolled_courses,
  })))
}

/// `GET /user/courses`
pub async fn courses<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Result<Json<Value>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let courses = state.planner.enrolled_courses(account.id).await?;
  Ok(Json(json!({
    "user_id":          account.id,
    "count":            courses.len(),
    "enrolled_courses": courses,
  })))
}
