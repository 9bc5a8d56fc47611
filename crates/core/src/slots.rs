//! # Slot generation and classification
//!
//! Slots are the arithmetic sequence `start, start + d, start + 2d, ...` of a
//! working window, cut off as soon as the next start would reach the close
//! of the window. Each slot is then classified in this order:
//!
//! 1. its start time is in the occupied set: [`SlotStatus::Occupied`]
//! 2. the reference date is today and the slot started before now: [`SlotStatus::Past`]
//! 3. otherwise: [`SlotStatus::Available`]

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    slot::{ClassifiedSlot, SlotStatus},
    time_of_day::TimeOfDay,
    working_hours::WorkingHours,
};

/// Produces the ordered slot start times for a working window.
///
/// A degenerate window (`start >= end`) or a zero duration yields an empty
/// list. Calling this twice with the same inputs yields the same list.
///
/// # Example
///
/// ```
/// use clinicslots_core::models::{time_of_day::TimeOfDay, working_hours::WorkingHours};
/// use clinicslots_core::slots::generate_slots;
///
/// let hours = WorkingHours::new("08:00".parse().unwrap(), "18:00".parse().unwrap());
/// let slots = generate_slots(hours, 30);
/// assert_eq!(slots.len(), 20);
/// assert_eq!(slots.last().map(TimeOfDay::to_string).as_deref(), Some("17:30"));
/// ```
pub fn generate_slots(hours: WorkingHours, slot_duration_minutes: u32) -> Vec<TimeOfDay> {
    if slot_duration_minutes == 0 {
        warn!("Slot duration of zero minutes requested, no slots generated");
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = Some(hours.start);

    while let Some(start) = current {
        if start >= hours.end {
            break;
        }
        slots.push(start);
        current = start.checked_add_minutes(slot_duration_minutes);
    }

    slots
}

/// Assigns a status to a single slot.
///
/// `now` is the caller's local wall-clock instant; "past" only applies when
/// `reference_date` is the same calendar day as `now`.
pub fn classify_slot(
    slot: TimeOfDay,
    occupied: &HashSet<TimeOfDay>,
    reference_date: NaiveDate,
    now: NaiveDateTime,
) -> SlotStatus {
    if occupied.contains(&slot) {
        return SlotStatus::Occupied;
    }

    let is_today = reference_date == now.date();
    if is_today && reference_date.and_time(slot.to_naive_time()) < now {
        return SlotStatus::Past;
    }

    SlotStatus::Available
}

/// Everything the caller supplies to render one day of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub working_hours: WorkingHours,
    pub slot_duration_minutes: u32,
    #[serde(default)]
    pub occupied: HashSet<TimeOfDay>,
}

impl SlotRequest {
    pub fn new(date: NaiveDate, working_hours: WorkingHours, slot_duration_minutes: u32) -> Self {
        Self {
            date,
            working_hours,
            slot_duration_minutes,
            occupied: HashSet::new(),
        }
    }

    pub fn with_occupied<I>(mut self, occupied: I) -> Self
    where
        I: IntoIterator<Item = TimeOfDay>,
    {
        self.occupied.extend(occupied);
        self
    }

    /// Generates and classifies the day's slots, in generator order.
    pub fn classify(&self, now: NaiveDateTime) -> Vec<ClassifiedSlot> {
        generate_slots(self.working_hours, self.slot_duration_minutes)
            .into_iter()
            .map(|start| ClassifiedSlot {
                start,
                end: self.slot_end(start),
                status: classify_slot(start, &self.occupied, self.date, now),
            })
            .collect()
    }

    fn slot_end(&self, start: TimeOfDay) -> TimeOfDay {
        start
            .checked_add_minutes(self.slot_duration_minutes)
            .map_or(self.working_hours.end, |end| end.min(self.working_hours.end))
    }
}
