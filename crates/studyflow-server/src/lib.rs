//! HTTP surface for StudyFlow.
//!
//! Exposes an axum [`Router`] over a [`Planner`] (accounts, enrollment,
//! calendar) and any [`AssignmentStore`]. Every route except the catalog
//! browsing endpoints and `/auth/register` / `/auth/login` requires a bearer
//! token.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
  routing::{delete, get, post},
};
use serde::Deserialize;
use studyflow_core::store::AssignmentStore;
use studyflow_engine::Planner;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{assignments, courses, enrollment, schedule, session};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STUDYFLOW_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  /// Identity store file, rewritten in full on every account mutation.
  #[serde(default = "default_accounts_path")]
  pub accounts_path:      PathBuf,
  #[serde(default = "default_catalog_path")]
  pub catalog_path:       PathBuf,
  #[serde(default = "default_assignments_path")]
  pub assignments_path:   PathBuf,
  /// HMAC key for bearer tokens.
  pub token_secret:       String,
  #[serde(default = "default_token_ttl_minutes")]
  pub token_ttl_minutes:  i64,
  #[serde(default = "default_institution_domain")]
  pub institution_domain: String,
  #[serde(default = "default_cors_origin")]
  pub cors_origin:        String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_accounts_path() -> PathBuf { PathBuf::from("users_data.json") }

fn default_catalog_path() -> PathBuf { PathBuf::from("fast_scraped_courses.json") }

fn default_assignments_path() -> PathBuf { PathBuf::from("assignments.db") }

fn default_token_ttl_minutes() -> i64 { studyflow_engine::token::DEFAULT_TTL_MINUTES }

fn default_institution_domain() -> String { "uottawa.ca".to_string() }

fn default_cors_origin() -> String { "http://localhost:3000".to_string() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: AssignmentStore> {
  pub planner:     Arc<Planner>,
  pub assignments: Arc<S>,
  pub config:      Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: AssignmentStore + Clone + 'static,
{
  let cors = cors_layer(&state.config.cors_origin);

  Router::new()
    // Catalog
    .route("/",                           get(courses::health::<S>))
    .route("/courses/all",                get(courses::all::<S>))
    .route("/courses/subjects",           get(courses::subjects::<S>))
    .route("/courses/subject/{subject}",  get(courses::by_subject::<S>))
    .route("/courses/search",             get(courses::search::<S>))
    // Session
    .route("/auth/register",              post(session::register::<S>))
    .route("/auth/login",                 post(session::login::<S>))
    .route("/auth/me",                    get(session::me))
    .route("/auth/logout",                post(session::logout))
    // Enrollment
    .route("/user/enroll/{course_code}",   post(enrollment::enroll::<S>))
    .route("/user/unenroll/{course_code}", delete(enrollment::unenroll::<S>))
    .route("/user/courses",                get(enrollment::courses::<S>))
    // Schedule
    .route("/schedule",                   get(schedule::view::<S>))
    .route("/schedule/conflicts",         get(schedule::conflicts::<S>))
    .route("/schedule/manual",            post(schedule::add_manual::<S>))
    .route(
      "/schedule/{course_code}/slot",
      post(schedule::add_slot::<S>).delete(schedule::remove_slot::<S>),
    )
    // Assignments
    .route("/assignments", get(assignments::list::<S>).post(assignments::create::<S>))
    .route("/assignments/summary/stats", get(assignments::stats::<S>))
    .route(
      "/assignments/{id}",
      get(assignments::get_one::<S>)
        .put(assignments::update::<S>)
        .delete(assignments::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors)
    .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
  let layer = CorsLayer::new()
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    .allow_credentials(true);

  match HeaderValue::from_str(origin) {
    Ok(origin) => layer.allow_origin(origin),
    Err(_) => {
      tracing::warn!(origin, "ignoring unparseable CORS origin");
      layer
    }
  }
}

#[cfg(test)]
mod tests;
