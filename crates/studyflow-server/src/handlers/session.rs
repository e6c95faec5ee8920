//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: registration fields; 201 with a token |
//! | `POST` | `/auth/login`    | Body: `{"email", "password"}` |
//! | `GET`  | `/auth/me`       | Bearer token required |
//! | `POST` | `/auth/logout`   | Bearer token required; tokens are not revoked |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use studyflow_core::{
  account::{Profile, Registration},
  store::AssignmentStore,
};
use studyflow_engine::Session;

use crate::{AppState, auth::CurrentAccount, error::ApiError};

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub token_type:   &'static str,
  pub expires_at:   DateTime<Utc>,
  pub user:         Profile,
}

impl From<Session> for TokenResponse {
  fn from(session: Session) -> Self {
    Self {
      access_token: session.token.token,
      token_type:   "bearer",
      expires_at:   session.token.expires_at,
      user:         session.account.profile(),
    }
  }
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<Registration>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let session = state.planner.register(body).await?;
  Ok((StatusCode::CREATED, Json(TokenResponse::from(session))))
}

#[derive(Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: AssignmentStore + Clone + 'static,
{
  let session = state.planner.login(&body.email, &body.password).await?;
  Ok(Json(session.into()))
}

/// `GET /auth/me`
pub async fn me(CurrentAccount(account): CurrentAccount) -> Json<Profile> {
  Json(account.profile())
}

/// `POST /auth/logout`
pub async fn logout(CurrentAccount(account): CurrentAccount) -> Json<Value> {
  tracing::info!(account_id = %account.id, "logout");
  Json(json!({ "message": "Successfully logged out" }))
}
