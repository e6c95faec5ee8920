//! Handlers for catalog browsing. None of these require a token.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Health check with catalog counts |
//! | `GET`  | `/courses/all` | `?limit=` (default 200) |
//! | `GET`  | `/courses/subjects` | Sorted subject codes |
//! | `GET`  | `/courses/subject/{subject}` | `?limit=` (default 50) |
//! | `GET`  | `/courses/search` | `?q=&subject=&limit=` (default 50) |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use studyflow_core::{catalog::CourseQuery, store::AssignmentStore};

use crate::AppState;

const ALL_LIMIT: usize = 200;
const PAGE_LIMIT: usize = 50;

/// `GET /`
pub async fn health<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let catalog = state.planner.catalog();
  Json(json!({
    "message":            "StudyFlow API is running",
    "total_courses":      catalog.len(),
    "available_subjects": catalog.subjects().len(),
    "status":             "healthy",
  }))
}

#[derive(Debug, Deserialize, Default)]
pub struct LimitParams {
  pub limit: Option<usize>,
}

/// `GET /courses/all[?limit=N]`
pub async fn all<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LimitParams>,
) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let limit = params.limit.unwrap_or(ALL_LIMIT);
  let matches = state.planner.catalog().search(&CourseQuery {
    limit: Some(limit),
    ..Default::default()
  });
  Json(json!({
    "courses":         matches.courses,
    "total_available": matches.total,
    "limit":           limit,
  }))
}

/// `GET /courses/subjects`
pub async fn subjects<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let subjects = state.planner.catalog().subjects();
  Json(json!({ "count": subjects.len(), "subjects": subjects }))
}

/// `GET /courses/subject/{subject}[?limit=N]`
pub async fn by_subject<S>(
  State(state): State<AppState<S>>,
  Path(subject): Path<String>,
  Query(params): Query<LimitParams>,
) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let limit = params.limit.unwrap_or(PAGE_LIMIT);
  let subject = subject.to_ascii_uppercase();
  let matches = state.planner.catalog().search(&CourseQuery {
    subject: Some(subject.clone()),
    limit:   Some(limit),
    ..Default::default()
  });
  Json(json!({
    "subject":         subject,
    "courses":         matches.courses,
    "total_available": matches.total,
    "limit":           limit,
  }))
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free text over title, code and description.
  pub q:       Option<String>,
  pub subject: Option<String>,
  pub limit:   Option<usize>,
}

/// `GET /courses/search[?q=...][&subject=...][&limit=N]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let query = CourseQuery {
    text:    params.q.filter(|q| !q.is_empty()),
    subject: params.subject.filter(|s| !s.is_empty()),
    limit:   Some(params.limit.unwrap_or(PAGE_LIMIT)),
  };
  let matches = state.planner.catalog().search(&query);
  Json(json!({
    "query":          query.text,
    "subject_filter": query.subject,
    "count":          matches.courses.len(),
    "courses":        matches.courses,
    "total_matches":  matches.total,
  }))
}
