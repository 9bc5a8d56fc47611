use serde::{Deserialize, Serialize};

use super::time_of_day::TimeOfDay;

/// The daily open/close window within which slots are offered.
///
/// `start < end` is expected but not enforced; a window with
/// `start >= end` is degenerate and simply offers no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkingHours {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the window in minutes, zero when degenerate.
    pub fn length_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Half-open containment: `start <= time < end`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }
}
