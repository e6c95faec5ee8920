//! Weekly workload aggregation.

use crate::schedule::{ScheduleEntry, TimeSlot};

/// Total scheduled time per week, in hours.
///
/// Overlapping slots are counted in full. Malformed slots (end not after
/// start) contribute nothing.
pub fn weekly_hours(entries: &[ScheduleEntry]) -> f64 {
  minutes_to_hours(entries.iter().flat_map(|e| &e.time_slots))
}

fn minutes_to_hours<'a>(slots: impl IntoIterator<Item = &'a TimeSlot>) -> f64 {
  let minutes: u32 = slots
    .into_iter()
    .filter_map(TimeSlot::duration_minutes)
    .map(u32::from)
    .sum();
  f64::from(minutes) / 60.0
}
