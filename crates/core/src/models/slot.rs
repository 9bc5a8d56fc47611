use serde::{Deserialize, Serialize};

use super::time_of_day::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Occupied,
    Past,
}

impl SlotStatus {
    pub fn is_selectable(&self) -> bool {
        matches!(self, SlotStatus::Available)
    }
}

/// A generated slot together with its derived status.
///
/// `end` is the start plus the slot duration, clamped to the close of the
/// working window, so the last slot of an uneven window is shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub past: usize,
    pub first_available: Option<TimeOfDay>,
}

impl SlotSummary {
    pub fn from_slots(slots: &[ClassifiedSlot]) -> Self {
        let mut summary = Self {
            total: slots.len(),
            ..Self::default()
        };

        for slot in slots {
            match slot.status {
                SlotStatus::Available => {
                    summary.available += 1;
                    summary.first_available.get_or_insert(slot.start);
                }
                SlotStatus::Occupied => summary.occupied += 1,
                SlotStatus::Past => summary.past += 1,
            }
        }

        summary
    }
}
