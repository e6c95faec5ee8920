//! Error type for `studyflow-engine`.

use thiserror::Error;
use uuid::Uuid;

/// Why a bearer token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
  /// Malformed, unsigned or tampered input.
  #[error("invalid token")]
  Invalid,
  /// Well-formed and correctly signed, but past its expiry.
  #[error("token expired")]
  Expired,
  /// Valid and unexpired, but the subject no longer resolves to an account.
  #[error("token subject does not resolve to an account")]
  UnknownSubject,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] studyflow_core::Error),

  #[error("email already registered")]
  DuplicateEmail,

  #[error("invalid email or password")]
  InvalidCredentials,

  #[error(transparent)]
  Token(#[from] TokenError),

  #[error("account not found: {0}")]
  AccountNotFound(Uuid),

  #[error("course {0} not found")]
  CourseNotFound(String),

  #[error("already enrolled in {0}")]
  AlreadyEnrolled(String),

  #[error("not enrolled in {0}")]
  NotEnrolled(String),

  #[error("token secret must be at least {0} bytes")]
  WeakSecret(usize),

  #[error("token lifetime of {0} minutes is out of range")]
  InvalidTtl(i64),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("background task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

/// Coarse classification used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Malformed input, rejected before any state change.
  Validation,
  /// Unknown course or account.
  NotFound,
  /// The operation contradicts current state; nothing was changed.
  Conflict,
  /// Bad credentials or an unusable token.
  Auth,
  /// The durable store could not be read or written.
  Persistence,
  Internal,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::Validation(_) => ErrorKind::Validation,
      Error::AccountNotFound(_) | Error::CourseNotFound(_) => ErrorKind::NotFound,
      Error::DuplicateEmail | Error::AlreadyEnrolled(_) | Error::NotEnrolled(_) => {
        ErrorKind::Conflict
      }
      Error::InvalidCredentials | Error::Token(_) => ErrorKind::Auth,
      Error::Io(_) | Error::Json(_) => ErrorKind::Persistence,
      Error::WeakSecret(_) | Error::InvalidTtl(_) | Error::PasswordHash(_) | Error::Join(_) => {
        ErrorKind::Internal
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
