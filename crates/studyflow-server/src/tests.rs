//! End-to-end tests driving the full router with `oneshot`.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use studyflow_core::catalog::CourseSummary;
use studyflow_engine::{IdentityStore, JsonCatalog, Planner, TokenService};
use studyflow_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use super::*;

const SECRET: &str = "router-test-secret-0123456789";

fn course(code: &str, subject: &str, title: &str) -> CourseSummary {
  CourseSummary {
    code:          code.into(),
    title:         title.into(),
    subject:       subject.into(),
    credits:       3,
    description:   String::new(),
    prerequisites: None,
  }
}

async fn app() -> Router {
  let catalog = JsonCatalog::from_courses(vec![
    course("CSI2110", "CSI", "Data Structures and Algorithms"),
    course("CSI2132", "CSI", "Databases I"),
    course("MAT1341", "MAT", "Introduction to Linear Algebra"),
  ]);
  let tokens = TokenService::new(SECRET, chrono::Duration::minutes(30)).unwrap();
  let planner = Planner::new(IdentityStore::in_memory("uottawa.ca"), Arc::new(catalog), tokens);

  let state = AppState {
    planner:     Arc::new(planner),
    assignments: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
    config:      Arc::new(ServerConfig {
      host:               "127.0.0.1".to_string(),
      port:               8000,
      accounts_path:      PathBuf::from("users_data.json"),
      catalog_path:       PathBuf::from("courses.json"),
      assignments_path:   PathBuf::from(":memory:"),
      token_secret:       SECRET.to_string(),
      token_ttl_minutes:  30,
      institution_domain: "uottawa.ca".to_string(),
      cors_origin:        "http://localhost:3000".to_string(),
    }),
  };
  router(state)
}

struct Reply {
  status:  StatusCode,
  headers: axum::http::HeaderMap,
  body:    Value,
}

async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(token) = token {
    builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
  }
  let req = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let headers = resp.headers().clone();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  Reply { status, headers, body }
}

/// Register `email` and return its access token.
async fn register(app: &Router, email: &str) -> String {
  let reply = call(app, "POST", "/auth/register", None, Some(json!({
    "email":      email,
    "password":   "hunter22",
    "full_name":  "Jamie Doe",
    "student_id": "300123456",
  })))
  .await;
  assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
  reply.body["access_token"].as_str().unwrap().to_string()
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_catalog_counts() {
  let app = app().await;
  let reply = call(&app, "GET", "/", None, None).await;
  assert_eq!(reply.status, StatusCode::OK);
  assert_eq!(reply.body["total_courses"], 3);
  assert_eq!(reply.body["available_subjects"], 2);
}

#[tokio::test]
async fn course_search_and_subject_listing() {
  let app = app().await;

  let reply = call(&app, "GET", "/courses/search?q=data&limit=1", None, None).await;
  assert_eq!(reply.body["total_matches"], 2);
  assert_eq!(reply.body["count"], 1);

  let reply = call(&app, "GET", "/courses/subject/mat", None, None).await;
  assert_eq!(reply.body["subject"], "MAT");
  assert_eq!(reply.body["courses"][0]["code"], "MAT1341");

  let reply = call(&app, "GET", "/courses/subjects", None, None).await;
  assert_eq!(reply.body["subjects"], json!(["CSI", "MAT"]));
}

// ─── Session ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_me_hides_password_hash() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;

  let reply = call(&app, "GET", "/auth/me", Some(&token), None).await;
  assert_eq!(reply.status, StatusCode::OK);
  assert_eq!(reply.body["email"], "jdoe@uottawa.ca");
  assert_eq!(reply.body["enrolled_courses"], json!([]));
  assert!(reply.body.get("password_hash").is_none());
}

#[tokio::test]
async fn registration_errors_map_to_client_faults() {
  let app = app().await;
  register(&app, "jdoe@uottawa.ca").await;

  let dup = call(&app, "POST", "/auth/register", None, Some(json!({
    "email": "jdoe@uottawa.ca", "password": "x", "full_name": "J",
  })))
  .await;
  assert_eq!(dup.status, StatusCode::CONFLICT);

  let foreign = call(&app, "POST", "/auth/register", None, Some(json!({
    "email": "jdoe@gmail.com", "password": "x", "full_name": "J",
  })))
  .await;
  assert_eq!(foreign.status, StatusCode::BAD_REQUEST);
  assert!(foreign.body["detail"].as_str().unwrap().contains("uottawa.ca"));

  let short_id = call(&app, "POST", "/auth/register", None, Some(json!({
    "email": "other@uottawa.ca", "password": "x", "full_name": "J", "student_id": "123",
  })))
  .await;
  assert_eq!(short_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_round_trip_and_bad_password() {
  let app = app().await;
  register(&app, "jdoe@uottawa.ca").await;

  let ok = call(&app, "POST", "/auth/login", None, Some(json!({
    "email": "jdoe@uottawa.ca", "password": "hunter22",
  })))
  .await;
  assert_eq!(ok.status, StatusCode::OK);
  assert_eq!(ok.body["token_type"], "bearer");

  let bad = call(&app, "POST", "/auth/login", None, Some(json!({
    "email": "jdoe@uottawa.ca", "password": "wrong",
  })))
  .await;
  assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
  assert_eq!(bad.headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[tokio::test]
async fn token_failures_are_indistinguishable() {
  let app = app().await;

  let missing = call(&app, "GET", "/auth/me", None, None).await;
  let garbage = call(&app, "GET", "/auth/me", Some("not.a-token"), None).await;
  assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
  assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
  assert_eq!(missing.body, garbage.body);

  let logout = call(&app, "POST", "/auth/logout", Some("not.a-token"), None).await;
  assert_eq!(logout.status, StatusCode::UNAUTHORIZED);
}

// ─── Enrollment and schedule ──────────────────────────────────────────────────

#[tokio::test]
async fn enroll_rules() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;

  let unknown = call(&app, "POST", "/user/enroll/XYZ9999", Some(&token), None).await;
  assert_eq!(unknown.status, StatusCode::NOT_FOUND);

  let first = call(&app, "POST", "/user/enroll/CSI2110", Some(&token), None).await;
  assert_eq!(first.status, StatusCode::OK);
  assert_eq!(first.body["enrolled_courses"], json!(["CSI2110"]));

  let again = call(&app, "POST", "/user/enroll/CSI2110", Some(&token), None).await;
  assert_eq!(again.status, StatusCode::CONFLICT);

  let not_enrolled = call(&app, "DELETE", "/user/unenroll/MAT1341", Some(&token), None).await;
  assert_eq!(not_enrolled.status, StatusCode::CONFLICT);

  let courses = call(&app, "GET", "/user/courses", Some(&token), None).await;
  assert_eq!(courses.body["count"], 1);
  assert_eq!(courses.body["enrolled_courses"][0]["title"], "Data Structures and Algorithms");
}

#[tokio::test]
async fn schedule_hours_conflicts_and_cascade() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;
  for code in ["CSI2110", "MAT1341"] {
    call(&app, "POST", &format!("/user/enroll/{code}"), Some(&token), None).await;
  }

  for (code, day, start, end) in [
    ("CSI2110", "Monday", "10:00", "11:30"),
    ("CSI2110", "Wed", "10:00", "11:30"),
    ("MAT1341", "monday", "11:00", "12:30"),
  ] {
    let reply = call(&app, "POST", &format!("/schedule/{code}/slot"), Some(&token), Some(json!({
      "day": day, "start_time": start, "end_time": end, "location": "STE B0138", "type": "Lecture",
    })))
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
  }

  let view = call(&app, "GET", "/schedule", Some(&token), None).await;
  assert_eq!(view.body["total_courses"], 2);
  assert_eq!(view.body["total_hours_per_week"], 4.5);
  assert_eq!(view.body["schedule"][0]["course_title"], "Data Structures and Algorithms");
  assert_eq!(view.body["schedule"][0]["time_slots"][1]["day"], "Wednesday");

  let conflicts = call(&app, "GET", "/schedule/conflicts", Some(&token), None).await;
  assert_eq!(conflicts.body["conflicts"], json!([
    { "course1": "CSI2110", "course2": "MAT1341", "day": "Monday" }
  ]));

  let dropped = call(&app, "DELETE", "/user/unenroll/CSI2110", Some(&token), None).await;
  assert_eq!(dropped.status, StatusCode::OK);
  assert_eq!(dropped.body["enrolled_courses"], json!(["MAT1341"]));

  let view = call(&app, "GET", "/schedule", Some(&token), None).await;
  assert_eq!(view.body["total_courses"], 1);
  assert_eq!(view.body["schedule"][0]["course_code"], "MAT1341");
}

#[tokio::test]
async fn slot_validation_and_enrollment_guard() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;

  let not_enrolled = call(&app, "POST", "/schedule/CSI2110/slot", Some(&token), Some(json!({
    "day": "Monday", "start_time": "10:00", "end_time": "11:00", "type": "Lab",
  })))
  .await;
  assert_eq!(not_enrolled.status, StatusCode::CONFLICT);

  call(&app, "POST", "/user/enroll/CSI2110", Some(&token), None).await;

  let inverted = call(&app, "POST", "/schedule/CSI2110/slot", Some(&token), Some(json!({
    "day": "Monday", "start_time": "11:00", "end_time": "10:00", "type": "Lab",
  })))
  .await;
  assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

  let bad_day = call(&app, "POST", "/schedule/CSI2110/slot", Some(&token), Some(json!({
    "day": "Funday", "start_time": "10:00", "end_time": "11:00", "type": "Lab",
  })))
  .await;
  assert_eq!(bad_day.status, StatusCode::BAD_REQUEST);

  let view = call(&app, "GET", "/schedule", Some(&token), None).await;
  assert_eq!(view.body["total_courses"], 0);
}

#[tokio::test]
async fn manual_personal_entry_and_idempotent_removal() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;

  let added = call(&app, "POST", "/schedule/manual", Some(&token), Some(json!({
    "course_code":  "GYM",
    "course_title": "Gym",
    "day":          "Friday",
    "start_time":   "17:00",
    "end_time":     "18:00",
    "location":     "Montpetit",
    "session_type": "Personal",
    "is_personal":  true,
  })))
  .await;
  assert_eq!(added.status, StatusCode::CREATED, "{}", added.body);
  assert_eq!(added.body["entry"]["color"], "blue");
  assert_eq!(added.body["entry"]["is_personal"], true);

  for _ in 0..2 {
    let removed = call(
      &app,
      "DELETE",
      "/schedule/GYM/slot?day=Friday&start_time=17:00",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK);
  }

  let view = call(&app, "GET", "/schedule", Some(&token), None).await;
  assert_eq!(view.body["schedule"][0]["time_slots"], json!([]));
  assert_eq!(view.body["total_hours_per_week"], 0.0);
}

// ─── Assignments ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn assignment_lifecycle_is_scoped_to_owner() {
  let app = app().await;
  let token = register(&app, "jdoe@uottawa.ca").await;
  let other = register(&app, "other@uottawa.ca").await;

  let body = json!({
    "title":       "Lab 3",
    "course_code": "CSI2110",
    "due_date":    "2031-03-01T23:59:00Z",
    "priority":    "high",
  });

  let refused = call(&app, "POST", "/assignments", Some(&token), Some(body.clone())).await;
  assert_eq!(refused.status, StatusCode::CONFLICT);

  call(&app, "POST", "/user/enroll/CSI2110", Some(&token), None).await;
  let created = call(&app, "POST", "/assignments", Some(&token), Some(body)).await;
  assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
  assert_eq!(created.body["status"], "pending");
  let id = created.body["id"].as_str().unwrap().to_string();

  let hidden = call(&app, "GET", &format!("/assignments/{id}"), Some(&other), None).await;
  assert_eq!(hidden.status, StatusCode::NOT_FOUND);

  let updated = call(&app, "PUT", &format!("/assignments/{id}"), Some(&token), Some(json!({
    "status": "in_progress",
  })))
  .await;
  assert_eq!(updated.status, StatusCode::OK);
  assert_eq!(updated.body["status"], "in_progress");
  assert_eq!(updated.body["title"], "Lab 3");

  let filtered = call(&app, "GET", "/assignments?status_filter=pending", Some(&token), None).await;
  assert_eq!(filtered.body, json!([]));

  let stats = call(&app, "GET", "/assignments/summary/stats", Some(&token), None).await;
  assert_eq!(stats.body["total"], 1);
  assert_eq!(stats.body["in_progress"], 1);

  let deleted = call(&app, "DELETE", &format!("/assignments/{id}"), Some(&token), None).await;
  assert_eq!(deleted.status, StatusCode::OK);
  let gone = call(&app, "DELETE", &format!("/assignments/{id}"), Some(&token), None).await;
  assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
