use serde::{Deserialize, Serialize};

use crate::models::{slot::ClassifiedSlot, time_of_day::TimeOfDay};

/// The single slot a user has picked, if any.
///
/// Only [`Available`](crate::models::slot::SlotStatus::Available) slots can
/// be picked. Attempts to pick anything else are ignored, the way a disabled
/// control ignores clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    selected: Option<TimeOfDay>,
}

impl SlotSelection {
    /// Restores a selection the caller was already holding.
    pub fn with_selected(selected: Option<TimeOfDay>) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Option<TimeOfDay> {
        self.selected
    }

    /// Selects `slot` if it is available and reports whether it was accepted.
    pub fn select(&mut self, slot: &ClassifiedSlot) -> bool {
        if !slot.status.is_selectable() {
            return false;
        }
        self.selected = Some(slot.start);
        true
    }

    /// Selects the slot starting at `time` from a classified day.
    ///
    /// Times that are not one of `slots` are rejected like unavailable ones.
    pub fn select_time(&mut self, time: TimeOfDay, slots: &[ClassifiedSlot]) -> bool {
        slots
            .iter()
            .find(|slot| slot.start == time)
            .is_some_and(|slot| self.select(slot))
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
