//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use studyflow_engine::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Engine(#[from] studyflow_engine::Error),

  /// A request field failed to parse into its domain type.
  #[error(transparent)]
  Invalid(#[from] studyflow_core::Error),

  /// Missing or malformed `Authorization` header.
  #[error("not authenticated")]
  Unauthorized,

  #[error("assignment {0} not found")]
  AssignmentNotFound(Uuid),

  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Body for every rejected token, whatever the reason.
const UNAUTHORIZED_DETAIL: &str = "could not validate credentials";

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::Engine(e) => match e.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::Persistence | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ApiError::Invalid(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::AssignmentNotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn detail(&self) -> String {
    match self {
      ApiError::Engine(studyflow_engine::Error::Token(_)) | ApiError::Unauthorized => {
        UNAUTHORIZED_DETAIL.to_string()
      }
      _ if self.status().is_server_error() => "internal server error".to_string(),
      other => other.to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let mut res = (status, Json(json!({ "detail": self.detail() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
