//! The schedule store: each account's calendar entries.
//!
//! Entries are kept in creation order per account and are unique by course
//! code. Entries whose last slot is removed are kept (empty) rather than
//! pruned; they disappear only when the course is dropped.
//!
//! The store itself is plain data. Callers serialise access per account; see
//! [`Planner`](crate::Planner).

use std::collections::HashMap;

use studyflow_core::{
  account::{Account, AccountId},
  schedule::{ClockTime, Day, ScheduleEntry, TimeSlot, palette_color},
};

use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct ScheduleStore {
  entries: HashMap<AccountId, Vec<ScheduleEntry>>,
}

impl ScheduleStore {
  pub fn new() -> Self { Self::default() }

  /// Append `slot` to the account's entry for `course_code`, creating the
  /// entry on first use.
  ///
  /// Non-personal slots require `course_code` to be in the account's enrolled
  /// courses. A new entry takes `course_title` and the next palette colour;
  /// an existing entry keeps its own title, colour and personal flag.
  pub fn add_slot(
    &mut self,
    account: &Account,
    course_code: &str,
    course_title: &str,
    slot: TimeSlot,
    is_personal: bool,
  ) -> Result<ScheduleEntry> {
    if !is_personal && !account.is_enrolled(course_code) {
      return Err(Error::NotEnrolled(course_code.to_owned()));
    }
    slot.validate()?;

    let entries = self.entries.entry(account.id).or_default();
    let index = match entries.iter().position(|e| e.course_code == course_code) {
      Some(i) => i,
      None => {
        let color = palette_color(entries.len());
        entries.push(ScheduleEntry::new(course_code, course_title, color, is_personal));
        entries.len() - 1
      }
    };

    let entry = &mut entries[index];
    entry.time_slots.push(slot);
    Ok(entry.clone())
  }

  /// Remove every slot in `course_code`'s entry that starts at `start_time`
  /// on `day`. Returns how many were removed; zero is not an error.
  pub fn remove_slot(
    &mut self,
    account_id: AccountId,
    course_code: &str,
    day: Day,
    start_time: ClockTime,
  ) -> usize {
    let Some(entry) = self
      .entries
      .get_mut(&account_id)
      .and_then(|entries| entries.iter_mut().find(|e| e.course_code == course_code))
    else {
      return 0;
    };

    let before = entry.time_slots.len();
    entry.time_slots.retain(|s| !s.starts_at(day, start_time));
    before - entry.time_slots.len()
  }

  /// Drop every entry for `course_code`. Returns how many were removed.
  pub fn cascade_delete(&mut self, account_id: AccountId, course_code: &str) -> usize {
    let Some(entries) = self.entries.get_mut(&account_id) else {
      return 0;
    };
    let before = entries.len();
    entries.retain(|e| e.course_code != course_code);
    before - entries.len()
  }

  pub fn list(&self, account_id: AccountId) -> &[ScheduleEntry] {
    self.entries.get(&account_id).map(Vec::as_slice).unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use studyflow_core::schedule::SlotType;
  use uuid::Uuid;

  use super::*;

  fn account(enrolled: &[&str]) -> Account {
    Account {
      id:               Uuid::new_v4(),
      email:            "a@uottawa.ca".into(),
      password_hash:    String::new(),
      full_name:        "A".into(),
      student_id:       None,
      created_at:       Utc::now(),
      enrolled_courses: enrolled.iter().map(|c| c.to_string()).collect(),
    }
  }

  fn slot(day: Day, start: &str, end: &str) -> TimeSlot {
    TimeSlot {
      day,
      start_time: start.parse().unwrap(),
      end_time:   end.parse().unwrap(),
      location:   "CBY B012".into(),
      kind:       SlotType::Lecture,
    }
  }

  #[test]
  fn second_add_appends_to_existing_entry() {
    let mut store = ScheduleStore::new();
    let acct = account(&["CSI2110"]);

    store.add_slot(&acct, "CSI2110", "Data Structures", slot(Day::Monday, "08:30", "10:00"), false).unwrap();
    let entry = store
      .add_slot(&acct, "CSI2110", "ignored", slot(Day::Wednesday, "08:30", "10:00"), false)
      .unwrap();

    assert_eq!(entry.time_slots.len(), 2);
    assert_eq!(entry.course_title, "Data Structures");
    assert_eq!(store.list(acct.id).len(), 1);
  }

  #[test]
  fn course_slot_requires_enrollment() {
    let mut store = ScheduleStore::new();
    let acct = account(&[]);
    let err = store
      .add_slot(&acct, "CSI2110", "x", slot(Day::Monday, "08:30", "10:00"), false)
      .unwrap_err();
    assert!(matches!(err, Error::NotEnrolled(code) if code == "CSI2110"));
    assert!(store.list(acct.id).is_empty());
  }

  #[test]
  fn personal_slot_needs_no_enrollment() {
    let mut store = ScheduleStore::new();
    let acct = account(&[]);
    let entry = store
      .add_slot(&acct, "Gym", "Gym", slot(Day::Tuesday, "18:00", "19:00"), true)
      .unwrap();
    assert!(entry.is_personal);
  }

  #[test]
  fn inverted_slot_is_rejected_without_creating_an_entry() {
    let mut store = ScheduleStore::new();
    let acct = account(&["CSI2110"]);
    let err = store
      .add_slot(&acct, "CSI2110", "x", slot(Day::Monday, "10:00", "09:00"), false)
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(store.list(acct.id).is_empty());
  }

  #[test]
  fn colours_cycle_by_entry_count() {
    let mut store = ScheduleStore::new();
    let acct = account(&[]);
    let colors: Vec<String> = (0..8)
      .map(|i| {
        store
          .add_slot(&acct, &format!("P{i}"), "p", slot(Day::Friday, "09:00", "10:00"), true)
          .unwrap()
          .color
      })
      .collect();
    assert_eq!(colors[0], "blue");
    assert_eq!(colors[1], "purple");
    assert_eq!(colors[7], "blue");
  }

  #[test]
  fn remove_is_idempotent_and_keeps_empty_entry() {
    let mut store = ScheduleStore::new();
    let acct = account(&["CSI2110"]);
    store.add_slot(&acct, "CSI2110", "DS", slot(Day::Monday, "08:30", "10:00"), false).unwrap();

    let monday = Day::Monday;
    let start: ClockTime = "08:30".parse().unwrap();
    assert_eq!(store.remove_slot(acct.id, "CSI2110", monday, start), 1);
    assert_eq!(store.remove_slot(acct.id, "CSI2110", monday, start), 0);
    assert_eq!(store.remove_slot(acct.id, "NOPE", monday, start), 0);
    assert_eq!(store.remove_slot(Uuid::new_v4(), "CSI2110", monday, start), 0);

    let entries = store.list(acct.id);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].time_slots.is_empty());
  }

  #[test]
  fn cascade_removes_only_that_course() {
    let mut store = ScheduleStore::new();
    let acct = account(&["CSI2110", "MAT1341"]);
    store.add_slot(&acct, "CSI2110", "DS", slot(Day::Monday, "08:30", "10:00"), false).unwrap();
    store.add_slot(&acct, "MAT1341", "LA", slot(Day::Tuesday, "08:30", "10:00"), false).unwrap();

    assert_eq!(store.cascade_delete(acct.id, "CSI2110"), 1);
    let codes: Vec<&str> = store.list(acct.id).iter().map(|e| e.course_code.as_str()).collect();
    assert_eq!(codes, vec!["MAT1341"]);
  }
}
