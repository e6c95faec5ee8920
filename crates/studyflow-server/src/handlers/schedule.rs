//! Handlers for the weekly calendar.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/schedule` | Entries plus weekly hours |
//! | `GET`    | `/schedule/conflicts` | Overlapping slot pairs |
//! | `POST`   | `/schedule/manual` | Explicit title; personal items allowed |
//! | `POST`   | `/schedule/{course_code}/slot` | Title taken from the catalog |
//! | `DELETE` | `/schedule/{course_code}/slot` | `?day=&start_time=`; idempotent |
//!
//! Day, time and session-type fields arrive as strings and are parsed here so
//! that a malformed value is a 400 with a readable message.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use studyflow_core::{
  schedule::{ClockTime, Day, SlotType, TimeSlot},
  store::AssignmentStore,
};
use studyflow_engine::ScheduleView;

use crate::{AppState, auth::CurrentAccount, error::ApiError};

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /schedule`
pub async fn view<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Json<ScheduleView>
where
  S: AssignmentStore + Clone + 'static,
{
  Json(state.planner.schedule_view(account.id).await)
}

/// `GET /schedule/conflicts`
pub async fn conflicts<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
) -> Json<Value>
where
  S: AssignmentStore + Clone + 'static,
{
  let conflicts = state.planner.conflicts(account.id).await;
  Json(json!({ "conflicts": conflicts }))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// A slot as submitted by a client.
#[derive(Debug, Deserialize)]
pub struct SlotBody {
  pub day:        String,
  pub start_time: String,
  pub end_time:   String,
  #[serde(default)]
  pub location:   String,
  #[serde(rename = "type", alias = "session_type", default = "default_slot_type")]
  pub kind:       String,
}

fn default_slot_type() -> String { SlotType::Lecture.to_string() }

impl SlotBody {
  fn into_slot(self) -> Result<TimeSlot, studyflow_core::Error> {
    TimeSlot::new(
      Day::try_from(self.day)?,
      self.start_time.parse()?,
      self.end_time.parse()?,
      self.location,
      SlotType::try_from(self.kind)?,
    )
  }
}

#[derive(Debug, Deserialize)]
pub struct ManualBody {
  pub course_code:  String,
  pub course_title: String,
  #[serde(flatten)]
  pub slot:         SlotBody,
  #[serde(default)]
  pub is_personal:  bool,
}

/// `POST /schedule/manual`
pub async fn add_manual<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Json(body): Json<ManualBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  if body.course_code.trim().is_empty() {
    return Err(ApiError::BadRequest("course_code must not be empty".into()));
  }
  let slot = body.slot.into_slot()?;
  let entry = state
    .planner
    .add_slot(account.id, &body.course_code, Some(&body.course_title), slot, body.is_personal)
    .await?;

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Successfully added to schedule", "entry": entry })),
  ))
}

/// `POST /schedule/{course_code}/slot`
pub async fn add_slot<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(course_code): Path<String>,
  Json(body): Json<SlotBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let slot = body.into_slot()?;
  let entry = state
    .planner
    .add_slot(account.id, &course_code, None, slot, false)
    .await?;

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Time slot added", "entry": entry })),
  ))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RemoveParams {
  pub day:        String,
  pub start_time: String,
}

/// `DELETE /schedule/{course_code}/slot?day=...&start_time=...`
pub async fn remove_slot<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account): CurrentAccount,
  Path(course_code): Path<String>,
  Query(params): Query<RemoveParams>,
) -> Result<Json<Value>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let day = Day::try_from(params.day)?;
  let start_time: ClockTime = params.start_time.parse()?;
  state
    .planner
    .remove_slot(account.id, &course_code, day, start_time)
    .await;
  Ok(Json(json!({ "message": "Time slot removed" })))
}
