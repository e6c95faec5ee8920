//! Accounts: registered identities and their enrollment ledger.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

pub type AccountId = Uuid;

/// Required length of a student id, in characters.
pub const STUDENT_ID_LEN: usize = 9;

// ─── Stored record ───────────────────────────────────────────────────────────

/// The durable account record.
///
/// `enrolled_courses` is the enrollment ledger: insertion-ordered, each code
/// at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub id:               AccountId,
  pub email:            String,
  /// PHC string, e.g. `$argon2id$v=19$…`. Never the plaintext.
  pub password_hash:    String,
  pub full_name:        String,
  pub student_id:       Option<String>,
  pub created_at:       DateTime<Utc>,
  #[serde(default)]
  pub enrolled_courses: Vec<String>,
}

impl Account {
  pub fn is_enrolled(&self, course_code: &str) -> bool {
    self.enrolled_courses.iter().any(|c| c == course_code)
  }

  pub fn profile(&self) -> Profile {
    Profile {
      id:               self.id,
      email:            self.email.clone(),
      full_name:        self.full_name.clone(),
      student_id:       self.student_id.clone(),
      created_at:       self.created_at,
      enrolled_courses: self.enrolled_courses.clone(),
    }
  }
}

/// The client-facing view of an account; carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id:               AccountId,
  pub email:            String,
  pub full_name:        String,
  pub student_id:       Option<String>,
  pub created_at:       DateTime<Utc>,
  pub enrolled_courses: Vec<String>,
}

// ─── Registration input ──────────────────────────────────────────────────────

/// Input to registration. The password is plaintext here and is hashed
/// before anything is stored.
#[derive(Clone, Deserialize)]
pub struct Registration {
  pub email:      String,
  pub password:   String,
  pub full_name:  String,
  #[serde(default)]
  pub student_id: Option<String>,
}

impl fmt::Debug for Registration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registration")
      .field("email", &self.email)
      .field("password", &"<redacted>")
      .field("full_name", &self.full_name)
      .field("student_id", &self.student_id)
      .finish()
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check that `email` is a plausible address under `@{domain}`.
///
/// The domain must match exactly, including case. Email uniqueness is an
/// exact match too, so `a@x.ca` and `a@X.CA` could otherwise both register.
pub fn validate_email(email: &str, domain: &str) -> Result<()> {
  let (local, host) = email
    .rsplit_once('@')
    .ok_or_else(|| Error::InvalidEmail(email.to_owned()))?;

  if local.is_empty() || host.is_empty() || local.contains('@') || email.contains(char::is_whitespace) {
    return Err(Error::InvalidEmail(email.to_owned()));
  }
  if host != domain {
    return Err(Error::InvalidEmailDomain(domain.to_owned()));
  }
  Ok(())
}

/// Normalise an optional student id: blank becomes `None`, anything else must
/// be exactly [`STUDENT_ID_LEN`] characters. Content is not restricted to
/// digits.
pub fn normalize_student_id(student_id: Option<String>) -> Result<Option<String>> {
  match student_id {
    None => Ok(None),
    Some(s) if s.is_empty() => Ok(None),
    Some(s) => {
      let actual = s.chars().count();
      if actual == STUDENT_ID_LEN {
        Ok(Some(s))
      } else {
        Err(Error::InvalidStudentId { expected: STUDENT_ID_LEN, actual })
      }
    }
  }
}
