//! Calendar types: schedule entries and the weekly time slots they hold.
//!
//! A [`ScheduleEntry`] groups every slot a student has added for one course
//! (or one personal item). Slots recur weekly; they carry a day, a wall-clock
//! interval at minute resolution, a location and a session type.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Day ─────────────────────────────────────────────────────────────────────

/// Day of the week on which a slot recurs.
///
/// Parses full names (`Monday`) and three-letter abbreviations (`Mon`),
/// ignoring ASCII case. Always serialises as the full name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
  Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum Day {
  #[strum(to_string = "Monday", serialize = "Mon")]
  Monday,
  #[strum(to_string = "Tuesday", serialize = "Tue")]
  Tuesday,
  #[strum(to_string = "Wednesday", serialize = "Wed")]
  Wednesday,
  #[strum(to_string = "Thursday", serialize = "Thu")]
  Thursday,
  #[strum(to_string = "Friday", serialize = "Fri")]
  Friday,
  #[strum(to_string = "Saturday", serialize = "Sat")]
  Saturday,
  #[strum(to_string = "Sunday", serialize = "Sun")]
  Sunday,
}

impl TryFrom<String> for Day {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    Day::from_str(s.trim()).map_err(|_| Error::InvalidDay(s))
  }
}

impl From<Day> for String {
  fn from(day: Day) -> Self { day.to_string() }
}

// ─── Wall-clock time ─────────────────────────────────────────────────────────

/// A time of day at minute resolution, stored as minutes since midnight.
///
/// Textual form is 24-hour `HH:MM`; `H:MM` is accepted on input.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
  /// Build a time from hour and minute. Returns `None` outside `00:00..=23:59`.
  pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
    (hour < 24 && minute < 60).then_some(Self(hour * 60 + minute))
  }

  pub fn minutes_since_midnight(self) -> u16 { self.0 }

  pub fn hour(self) -> u16 { self.0 / 60 }

  pub fn minute(self) -> u16 { self.0 % 60 }
}

impl fmt::Display for ClockTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", self.hour(), self.minute())
  }
}

impl FromStr for ClockTime {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidTime(s.to_owned());

    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if h.is_empty() || h.len() > 2 || m.len() != 2 || !all_digits(h) || !all_digits(m) {
      return Err(invalid());
    }

    let hour: u16   = h.parse().map_err(|_| invalid())?;
    let minute: u16 = m.parse().map_err(|_| invalid())?;
    ClockTime::from_hm(hour, minute).ok_or_else(invalid)
  }
}

impl TryFrom<String> for ClockTime {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<ClockTime> for String {
  fn from(t: ClockTime) -> Self { t.to_string() }
}

// ─── Session type ────────────────────────────────────────────────────────────

/// What kind of session a slot represents.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum SlotType {
  Lecture,
  Lab,
  Tutorial,
  Personal,
  Other,
}

impl TryFrom<String> for SlotType {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    SlotType::from_str(s.trim()).map_err(|_| Error::InvalidSlotType(s))
  }
}

impl From<SlotType> for String {
  fn from(kind: SlotType) -> Self { kind.to_string() }
}

// ─── Time slot ───────────────────────────────────────────────────────────────

/// A single weekly-recurring interval. Has no identity of its own; it is
/// addressed by `(day, start_time)` within its containing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
  pub day:        Day,
  pub start_time: ClockTime,
  pub end_time:   ClockTime,
  #[serde(default)]
  pub location:   String,
  #[serde(rename = "type")]
  pub kind:       SlotType,
}

impl TimeSlot {
  /// Build a slot, rejecting intervals where `end_time <= start_time`.
  pub fn new(
    day: Day,
    start_time: ClockTime,
    end_time: ClockTime,
    location: impl Into<String>,
    kind: SlotType,
  ) -> Result<Self> {
    let slot = Self { day, start_time, end_time, location: location.into(), kind };
    slot.validate()?;
    Ok(slot)
  }

  pub fn validate(&self) -> Result<()> {
    if self.end_time <= self.start_time {
      return Err(Error::EmptyInterval {
        start: self.start_time.to_string(),
        end:   self.end_time.to_string(),
      });
    }
    Ok(())
  }

  /// Length of the slot in minutes, or `None` for a malformed interval.
  pub fn duration_minutes(&self) -> Option<u16> {
    self
      .end_time
      .minutes_since_midnight()
      .checked_sub(self.start_time.minutes_since_midnight())
      .filter(|m| *m > 0)
  }

  /// Half-open overlap on the same day. Touching endpoints do not overlap,
  /// and malformed slots never overlap anything.
  pub fn overlaps(&self, other: &TimeSlot) -> bool {
    if self.day != other.day
      || self.duration_minutes().is_none()
      || other.duration_minutes().is_none()
    {
      return false;
    }
    self.start_time < other.end_time && other.start_time < self.end_time
  }

  pub fn starts_at(&self, day: Day, start_time: ClockTime) -> bool {
    self.day == day && self.start_time == start_time
  }
}

// ─── Schedule entry ──────────────────────────────────────────────────────────

/// Display colours assigned to new entries, cycled by how many entries the
/// account already has.
pub const PALETTE: [&str; 7] =
  ["blue", "purple", "green", "red", "yellow", "pink", "orange"];

/// Colour for the entry created after `existing_entries` others.
pub fn palette_color(existing_entries: usize) -> &'static str {
  PALETTE[existing_entries % PALETTE.len()]
}

/// One course's (or one personal item's) calendar record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
  pub course_code:  String,
  pub course_title: String,
  /// Display-only.
  pub color:        String,
  pub is_personal:  bool,
  pub time_slots:   Vec<TimeSlot>,
}

impl ScheduleEntry {
  pub fn new(
    course_code: impl Into<String>,
    course_title: impl Into<String>,
    color: impl Into<String>,
    is_personal: bool,
  ) -> Self {
    Self {
      course_code: course_code.into(),
      course_title: course_title.into(),
      color: color.into(),
      is_personal,
      time_slots: Vec::new(),
    }
  }
}
