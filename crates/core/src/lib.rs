//! # Clinic Slots Core
//!
//! The slot availability model behind the clinic booking screen. Given a
//! working-hours window, a slot duration and the start times that are already
//! booked, it produces the ordered list of bookable slots for a day and
//! classifies each one as available, occupied or past.
//!
//! Everything in this crate is pure: "now" is always passed in by the caller
//! and nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod selection;
pub mod slots;
