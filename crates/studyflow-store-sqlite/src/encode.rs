//! Conversions between domain types and the plain-text SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase, and the two
//! enums use their wire names.

use chrono::{DateTime, Utc};
use studyflow_core::assignment::{Assignment, AssignmentStatus, Priority};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_priority(p: Priority) -> &'static str { p.into() }

pub fn decode_priority(s: &str) -> Result<Priority> {
  s.parse().map_err(|_| Error::Decode { column: "priority", value: s.to_owned() })
}

pub fn encode_status(s: AssignmentStatus) -> &'static str { s.into() }

pub fn decode_status(s: &str) -> Result<AssignmentStatus> {
  s.parse().map_err(|_| Error::Decode { column: "status", value: s.to_owned() })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawAssignment::from_row`].
pub const ASSIGNMENT_COLUMNS: &str = "assignment_id, account_id, title, description, \
   course_code, due_date, priority, status, estimated_hours, created_at";

/// Raw values read directly from an `assignments` row.
pub struct RawAssignment {
  pub assignment_id:   String,
  pub account_id:      String,
  pub title:           String,
  pub description:     String,
  pub course_code:     String,
  pub due_date:        String,
  pub priority:        String,
  pub status:          String,
  pub estimated_hours: Option<f64>,
  pub created_at:      String,
}

impl RawAssignment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assignment_id:   row.get(0)?,
      account_id:      row.get(1)?,
      title:           row.get(2)?,
      description:     row.get(3)?,
      course_code:     row.get(4)?,
      due_date:        row.get(5)?,
      priority:        row.get(6)?,
      status:          row.get(7)?,
      estimated_hours: row.get(8)?,
      created_at:      row.get(9)?,
    })
  }

  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      id:              decode_uuid(&self.assignment_id)?,
      account_id:      decode_uuid(&self.account_id)?,
      title:           self.title,
      description:     self.description,
      course_code:     self.course_code,
      due_date:        decode_dt(&self.due_date)?,
      priority:        decode_priority(&self.priority)?,
      status:          decode_status(&self.status)?,
      estimated_hours: self.estimated_hours,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enum_columns_use_wire_names() {
    assert_eq!(encode_status(AssignmentStatus::InProgress), "in_progress");
    assert_eq!(encode_priority(Priority::High), "high");
    assert_eq!(decode_status("completed").unwrap(), AssignmentStatus::Completed);
    assert!(matches!(
      decode_priority("urgent"),
      Err(Error::Decode { column: "priority", .. })
    ));
  }

  #[test]
  fn datetimes_round_trip_through_rfc3339() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
    assert!(decode_dt("next tuesday").is_err());
  }
}
