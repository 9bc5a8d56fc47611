use std::sync::Arc;

use axum::http::StatusCode;
use clinicslots_api::handlers::slots::{
    ClinicDefaultsResponse, SelectSlotResponse, SlotListResponse,
};
use clinicslots_core::models::{slot::SlotStatus, time_of_day::TimeOfDay};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{clinic_day, clinic_defaults, clinic_time, server_at, server_with_clock, MockClock};

fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid time")
}

#[test_log::test(tokio::test)]
async fn test_list_slots_uses_clinic_defaults() {
    let server = server_at(clinic_time(7, 0));

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2026-03-14" }))
        .await;

    response.assert_status_ok();
    let body: SlotListResponse = response.json();
    assert_eq!(body.working_hours, clinic_defaults().working_hours);
    assert_eq!(body.slot_duration_minutes, 30);
    assert_eq!(body.slots.len(), 20);
    assert_eq!(body.slots[0].start, t("08:00"));
    assert_eq!(body.slots[19].start, t("17:30"));
    assert_eq!(body.summary.available, 20);
    assert_eq!(body.summary.first_available, Some(t("08:00")));
}

#[tokio::test]
async fn test_list_slots_classifies_against_supplied_now() {
    let server = server_at(clinic_time(7, 0));

    let response = server
        .post("/api/slots")
        .json(&json!({
            "date": "2026-03-14",
            "working_hours": { "start": "09:00", "end": "11:00" },
            "slot_duration_minutes": 30,
            "occupied": ["9:00", "10:30"],
            "now": "2026-03-14T09:45:00"
        }))
        .await;

    response.assert_status_ok();
    let body: SlotListResponse = response.json();
    let statuses: Vec<(String, SlotStatus)> = body
        .slots
        .iter()
        .map(|slot| (slot.start.to_string(), slot.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("09:00".to_string(), SlotStatus::Occupied),
            ("09:30".to_string(), SlotStatus::Past),
            ("10:00".to_string(), SlotStatus::Available),
            ("10:30".to_string(), SlotStatus::Occupied),
        ]
    );
    assert_eq!(body.summary.first_available, Some(t("10:00")));
}

#[tokio::test]
async fn test_list_slots_reads_clock_when_now_missing() {
    let mut clock = MockClock::new();
    clock
        .expect_now()
        .times(1)
        .returning(|| clinic_time(12, 0));
    let server = server_with_clock(Arc::new(clock));

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2026-03-14" }))
        .await;

    let body: SlotListResponse = response.json();
    assert_eq!(body.summary.past, 8);
    assert_eq!(body.summary.available, 12);
}

#[tokio::test]
async fn test_list_slots_skips_clock_when_now_supplied() {
    let mut clock = MockClock::new();
    clock.expect_now().never();
    let server = server_with_clock(Arc::new(clock));

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2026-03-14", "now": "2026-03-14T12:00:00" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_list_slots_for_another_day_has_no_past() {
    let server = server_at(clinic_time(17, 59));

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2026-03-15" }))
        .await;

    let body: SlotListResponse = response.json();
    assert_eq!(body.date, clinic_day().succ_opt().unwrap());
    assert_eq!(body.summary.past, 0);
}

#[tokio::test]
async fn test_list_slots_degenerate_window_is_empty() {
    let server = server_at(clinic_time(7, 0));

    let response = server
        .post("/api/slots")
        .json(&json!({
            "date": "2026-03-14",
            "working_hours": { "start": "18:00", "end": "08:00" }
        }))
        .await;

    response.assert_status_ok();
    let body: SlotListResponse = response.json();
    assert!(body.slots.is_empty());
    assert_eq!(body.summary.first_available, None);
}

#[tokio::test]
async fn test_list_slots_rejects_zero_duration() {
    let server = server_at(clinic_time(7, 0));

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2026-03-14", "slot_duration_minutes": 0 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("slot_duration_minutes"));
}

#[rstest]
#[case(json!({ "date": "2026-03-14", "occupied": ["25:00"] }))]
#[case(json!({ "date": "2026-03-14", "working_hours": { "start": "8am", "end": "18:00" } }))]
#[case(json!({ "date": "14/03/2026" }))]
#[tokio::test]
async fn test_list_slots_rejects_malformed_body(#[case] body: serde_json::Value) {
    let server = server_at(clinic_time(7, 0));

    let response = server.post("/api/slots").json(&body).expect_failure().await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_clinic_defaults_endpoint() {
    let server = server_at(clinic_time(7, 0));

    let response = server.get("/api/slots/defaults").await;

    response.assert_status_ok();
    let body: ClinicDefaultsResponse = response.json();
    assert_eq!(body.working_hours, clinic_defaults().working_hours);
    assert_eq!(body.slot_duration_minutes, 30);
}

#[test_log::test(tokio::test)]
async fn test_select_available_slot() {
    let server = server_at(clinic_time(9, 10));

    let response = server
        .post("/api/slots/select")
        .json(&json!({
            "date": "2026-03-14",
            "occupied": ["10:00"],
            "candidate": "09:30"
        }))
        .await;

    response.assert_status_ok();
    let body: SelectSlotResponse = response.json();
    assert!(body.accepted);
    assert_eq!(body.selected, Some(t("09:30")));
    assert_eq!(body.status, Some(SlotStatus::Available));
}

#[tokio::test]
async fn test_select_replaces_current_selection() {
    let server = server_at(clinic_time(9, 10));

    let response = server
        .post("/api/slots/select")
        .json(&json!({
            "date": "2026-03-14",
            "current": "11:00",
            "candidate": "14:30"
        }))
        .await;

    let body: SelectSlotResponse = response.json();
    assert!(body.accepted);
    assert_eq!(body.selected, Some(t("14:30")));
}

#[rstest]
#[case("10:00", Some(SlotStatus::Occupied))]
#[case("08:30", Some(SlotStatus::Past))]
#[case("10:15", None)]
#[case("19:00", None)]
#[tokio::test]
async fn test_select_rejects_unavailable_candidates(
    #[case] candidate: &str,
    #[case] status: Option<SlotStatus>,
) {
    let server = server_at(clinic_time(9, 10));

    let response = server
        .post("/api/slots/select")
        .json(&json!({
            "date": "2026-03-14",
            "occupied": ["10:00"],
            "current": "11:00",
            "candidate": candidate
        }))
        .await;

    response.assert_status_ok();
    let body: SelectSlotResponse = response.json();
    assert!(!body.accepted);
    assert_eq!(body.selected, Some(t("11:00")));
    assert_eq!(body.status, status);
}

#[tokio::test]
async fn test_select_rejected_without_current_stays_empty() {
    let server = server_at(clinic_time(9, 10));

    let response = server
        .post("/api/slots/select")
        .json(&json!({ "date": "2026-03-14", "candidate": "08:00" }))
        .await;

    let body: SelectSlotResponse = response.json();
    assert!(!body.accepted);
    assert_eq!(body.selected, None);
}
