//! Error types for `studyflow-core`.
//!
//! Every variant here is a validation failure: malformed input that is
//! rejected before any state changes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("invalid time {0:?}: expected 24-hour HH:MM")]
  InvalidTime(String),

  #[error("invalid day {0:?}")]
  InvalidDay(String),

  #[error("invalid session type {0:?}")]
  InvalidSlotType(String),

  #[error("end time {end} must be after start time {start}")]
  EmptyInterval { start: String, end: String },

  #[error("invalid email address {0:?}")]
  InvalidEmail(String),

  #[error("only @{0} email addresses are allowed")]
  InvalidEmailDomain(String),

  #[error("student id must be exactly {expected} characters, got {actual}")]
  InvalidStudentId { expected: usize, actual: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
