//! # Slot Handlers
//!
//! Endpoints that turn a day's booking inputs into the list of bookable
//! slots, and that apply a user's slot pick against that list.
//!
//! Both endpoints are stateless: the caller sends the booked start times and
//! (for selection) the slot it currently holds, and gets back the derived
//! result. Working hours and slot length fall back to the clinic defaults
//! from configuration, and "now" falls back to the server clock.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{NaiveDate, NaiveDateTime};
use clinicslots_core::{
    errors::SlotError,
    models::{
        slot::{ClassifiedSlot, SlotStatus, SlotSummary},
        time_of_day::TimeOfDay,
        working_hours::WorkingHours,
    },
    selection::SlotSelection,
    slots::SlotRequest,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

/// Body of `POST /api/slots`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotQuery {
    /// Calendar day the slots are for
    pub date: NaiveDate,

    /// Overrides the clinic's default working hours
    pub working_hours: Option<WorkingHours>,

    /// Overrides the clinic's default slot length
    pub slot_duration_minutes: Option<u32>,

    /// Start times already taken by appointments
    #[serde(default)]
    pub occupied: Vec<TimeOfDay>,

    /// Local wall-clock instant to classify against; defaults to the server clock
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub date: NaiveDate,
    pub working_hours: WorkingHours,
    pub slot_duration_minutes: u32,
    pub slots: Vec<ClassifiedSlot>,
    pub summary: SlotSummary,
}

/// Body of `POST /api/slots/select`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectSlotRequest {
    #[serde(flatten)]
    pub query: SlotQuery,

    /// Slot the caller is currently holding, if any
    pub current: Option<TimeOfDay>,

    /// Slot the user is trying to pick
    pub candidate: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectSlotResponse {
    /// Selection after the attempt; unchanged when rejected
    pub selected: Option<TimeOfDay>,
    pub accepted: bool,
    /// Status of the candidate, or `None` when it is not a slot of that day
    pub status: Option<SlotStatus>,
}

impl SlotQuery {
    /// Fills in defaults and validates the query.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - slot duration of zero minutes
    fn resolve(&self, state: &ApiState) -> Result<(SlotRequest, NaiveDateTime), SlotError> {
        let working_hours = self
            .working_hours
            .unwrap_or(state.defaults.working_hours);
        let slot_duration_minutes = self
            .slot_duration_minutes
            .unwrap_or(state.defaults.slot_duration_minutes);

        if slot_duration_minutes == 0 {
            return Err(SlotError::Validation(
                "slot_duration_minutes must be greater than zero".to_string(),
            ));
        }

        let request = SlotRequest::new(self.date, working_hours, slot_duration_minutes)
            .with_occupied(self.occupied.iter().copied());
        let now = self.now.unwrap_or_else(|| state.clock.now());

        Ok((request, now))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicDefaultsResponse {
    pub working_hours: WorkingHours,
    pub slot_duration_minutes: u32,
}

/// Reports the working hours and slot length used when a query omits them
///
/// ```text
/// GET /api/slots/defaults
/// ```
pub async fn clinic_defaults(State(state): State<Arc<ApiState>>) -> Json<ClinicDefaultsResponse> {
    Json(ClinicDefaultsResponse {
        working_hours: state.defaults.working_hours,
        slot_duration_minutes: state.defaults.slot_duration_minutes,
    })
}

/// Lists the day's slots with their status
///
/// # Endpoint
///
/// ```text
/// POST /api/slots
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - zero slot duration
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Json(query): Json<SlotQuery>,
) -> Result<Json<SlotListResponse>, AppError> {
    let (request, now) = query.resolve(&state)?;

    let slots = request.classify(now);
    let summary = SlotSummary::from_slots(&slots);

    debug!(
        date = %request.date,
        total = summary.total,
        available = summary.available,
        occupied = summary.occupied,
        past = summary.past,
        "Classified slots"
    );

    Ok(Json(SlotListResponse {
        date: request.date,
        working_hours: request.working_hours,
        slot_duration_minutes: request.slot_duration_minutes,
        slots,
        summary,
    }))
}

/// Applies a slot pick against the day's classified slots
///
/// Picking an occupied or past slot, or a time that is not a slot of the
/// day, is not an error: the response reports `accepted: false` and echoes
/// the caller's current selection.
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/select
/// ```
#[axum::debug_handler]
pub async fn select_slot(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<SelectSlotRequest>,
) -> Result<Json<SelectSlotResponse>, AppError> {
    let (request, now) = body.query.resolve(&state)?;
    let slots = request.classify(now);

    let mut selection = SlotSelection::with_selected(body.current);
    let accepted = selection.select_time(body.candidate, &slots);
    let status = slots
        .iter()
        .find(|slot| slot.start == body.candidate)
        .map(|slot| slot.status);

    debug!(
        date = %request.date,
        candidate = %body.candidate,
        accepted,
        "Slot selection attempted"
    );

    Ok(Json(SelectSlotResponse {
        selected: selection.selected(),
        accepted,
        status,
    }))
}
