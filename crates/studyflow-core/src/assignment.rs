//! Assignment tracking: per-account coursework with due dates.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::account::AccountId;

// ─── Enums ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString,
  IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString,
  IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssignmentStatus {
  #[default]
  Pending,
  InProgress,
  Completed,
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
  pub id:              Uuid,
  pub account_id:      AccountId,
  pub title:           String,
  pub description:     String,
  pub course_code:     String,
  pub due_date:        DateTime<Utc>,
  pub priority:        Priority,
  pub status:          AssignmentStatus,
  pub estimated_hours: Option<f64>,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`AssignmentStore::create`](crate::store::AssignmentStore::create).
#[derive(Debug, Clone, Deserialize)]
pub struct NewAssignment {
  pub title:           String,
  #[serde(default)]
  pub description:     Option<String>,
  pub course_code:     String,
  pub due_date:        DateTime<Utc>,
  #[serde(default)]
  pub priority:        Priority,
  #[serde(default)]
  pub estimated_hours: Option<f64>,
}

/// A partial update. `None` fields are left untouched; there is no way to
/// clear `estimated_hours` once set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentPatch {
  pub title:           Option<String>,
  pub description:     Option<String>,
  pub status:          Option<AssignmentStatus>,
  pub priority:        Option<Priority>,
  pub estimated_hours: Option<f64>,
}

// ─── Filtering ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentFilter {
  pub status:      Option<AssignmentStatus>,
  pub course_code: Option<String>,
  pub priority:    Option<Priority>,
}

impl AssignmentFilter {
  pub fn matches(&self, a: &Assignment) -> bool {
    self.status.is_none_or(|s| a.status == s)
      && self.course_code.as_deref().is_none_or(|c| a.course_code == c)
      && self.priority.is_none_or(|p| a.priority == p)
  }
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Counts by status and by due date relative to `today`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentStats {
  pub total:         usize,
  pub pending:       usize,
  pub in_progress:   usize,
  pub completed:     usize,
  /// Due before today and not completed.
  pub overdue:       usize,
  pub due_today:     usize,
  /// Due after today and no more than seven days out.
  pub due_this_week: usize,
}

impl AssignmentStats {
  pub fn compute(assignments: &[Assignment], today: NaiveDate) -> Self {
    let week_end = today + Duration::days(7);
    let mut stats = Self { total: assignments.len(), ..Self::default() };

    for a in assignments {
      match a.status {
        AssignmentStatus::Pending => stats.pending += 1,
        AssignmentStatus::InProgress => stats.in_progress += 1,
        AssignmentStatus::Completed => stats.completed += 1,
      }

      let due = a.due_date.date_naive();
      if due < today {
        if a.status != AssignmentStatus::Completed {
          stats.overdue += 1;
        }
      } else if due == today {
        stats.due_today += 1;
      } else if due <= week_end {
        stats.due_this_week += 1;
      }
    }

    stats
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  fn assignment(due: NaiveDate, status: AssignmentStatus) -> Assignment {
    let due_date = Utc.from_utc_datetime(&due.and_hms_opt(23, 59, 0).unwrap());
    Assignment {
      id: Uuid::new_v4(),
      account_id: Uuid::nil(),
      title: "Lab report".into(),
      description: String::new(),
      course_code: "CSI2110".into(),
      due_date,
      priority: Priority::Medium,
      status,
      estimated_hours: None,
      created_at: Utc::now(),
    }
  }

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, 10, d).unwrap() }

  #[test]
  fn stats_bucket_by_status_and_due_date() {
    let today = day(10);
    let all = vec![
      assignment(day(5), AssignmentStatus::Pending),
      assignment(day(5), AssignmentStatus::Completed),
      assignment(day(10), AssignmentStatus::InProgress),
      assignment(day(14), AssignmentStatus::Pending),
      assignment(day(17), AssignmentStatus::Pending),
      assignment(day(25), AssignmentStatus::Pending),
    ];
    let stats = AssignmentStats::compute(&all, today);
    assert_eq!(stats, AssignmentStats {
      total:         6,
      pending:       4,
      in_progress:   1,
      completed:     1,
      overdue:       1,
      due_today:     1,
      due_this_week: 2,
    });
  }

  #[test]
  fn filter_combines_fields() {
    let a = assignment(day(1), AssignmentStatus::Pending);
    let f = AssignmentFilter {
      status:      Some(AssignmentStatus::Pending),
      course_code: Some("CSI2110".into()),
      priority:    None,
    };
    assert!(f.matches(&a));
    let f = AssignmentFilter { priority: Some(Priority::High), ..f };
    assert!(!f.matches(&a));
  }

  #[test]
  fn status_wire_names() {
    assert_eq!(AssignmentStatus::InProgress.to_string(), "in_progress");
    assert_eq!("in_progress".parse::<AssignmentStatus>().unwrap(), AssignmentStatus::InProgress);
    assert_eq!(serde_json::to_value(Priority::High).unwrap(), "high");
  }
}
