//! Conflict detection over a snapshot of one account's schedule.
//!
//! Every unordered pair of distinct entries is compared slot by slot. Two
//! slots conflict when they fall on the same day and their half-open
//! intervals intersect: `start_a < end_b && start_b < end_a`. A slot ending
//! at 11:30 and another starting at 11:30 do not conflict.
//!
//! The scan is `O(n² · s²)` in entries and slots per entry, which is fine for
//! a single weekly calendar.

use serde::{Deserialize, Serialize};

use crate::schedule::{Day, ScheduleEntry};

/// Two entries with at least one overlapping slot on `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
  #[serde(rename = "course1")]
  pub course_a: String,
  #[serde(rename = "course2")]
  pub course_b: String,
  pub day:      Day,
}

/// Report every `(course_a, course_b, day)` triple with overlapping slots.
///
/// Results follow entry iteration order (`course_a` always precedes
/// `course_b` in `entries`) and each triple is reported once, however many
/// slot pairs overlap on that day.
pub fn find_conflicts(entries: &[ScheduleEntry]) -> Vec<Conflict> {
  let mut conflicts: Vec<Conflict> = Vec::new();

  for (i, a) in entries.iter().enumerate() {
    for b in &entries[i + 1..] {
      for slot_a in &a.time_slots {
        for slot_b in &b.time_slots {
          if !slot_a.overlaps(slot_b) {
            continue;
          }
          let conflict = Conflict {
            course_a: a.course_code.clone(),
            course_b: b.course_code.clone(),
            day:      slot_a.day,
          };
          if !conflicts.contains(&conflict) {
            conflicts.push(conflict);
          }
        }
      }
    }
  }

  conflicts
}
