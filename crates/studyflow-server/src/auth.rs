//! Bearer-token extractor.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use studyflow_core::{account::Account, store::AssignmentStore};

use crate::{AppState, error::ApiError};

/// The account named by a valid bearer token.
///
/// Present in a handler's arguments means the request was authenticated.
pub struct CurrentAccount(pub Account);

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let (scheme, token) = value.split_once(' ').ok_or(ApiError::Unauthorized)?;
  if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
    return Err(ApiError::Unauthorized);
  }
  Ok(token.trim())
}

impl<S> FromRequestParts<AppState<S>> for CurrentAccount
where
  S: AssignmentStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    let account = state.planner.authenticate(token).await.inspect_err(|e| {
      tracing::warn!(reason = %e, path = %parts.uri.path(), "rejected bearer token");
    })?;
    Ok(CurrentAccount(account))
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn accepts_bearer_in_any_case() {
    assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), "abc.def");
  }

  #[test]
  fn rejects_other_schemes_and_blanks() {
    assert!(matches!(bearer_token(&headers("Basic dXNlcjpwYXNz")), Err(ApiError::Unauthorized)));
    assert!(matches!(bearer_token(&headers("Bearer ")), Err(ApiError::Unauthorized)));
    assert!(matches!(bearer_token(&headers("Bearer")), Err(ApiError::Unauthorized)));
    assert!(matches!(bearer_token(&HeaderMap::new()), Err(ApiError::Unauthorized)));
  }
}
