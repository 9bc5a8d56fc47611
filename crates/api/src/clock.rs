//! Source of "now" for requests that do not supply one.

use chrono::{Local, NaiveDateTime};

/// Reports the current local wall-clock time.
///
/// Handlers read the time through this trait rather than calling
/// `Local::now()` directly so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The server's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
