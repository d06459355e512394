//! Tests for `MemoryStore` and the provided `VisitStore` methods.

use std::path::PathBuf;

use chrono::NaiveDate;
use visit_core::{Visit, VisitAction, VisitStatus, VisitStore, VisitType};

use crate::{Error, MemoryStore};

fn visit(id: &str, status: VisitStatus) -> Visit {
  Visit::new(
    id,
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
    "09:00",
    "11:00",
    status,
    VisitType::Nbi,
  )
  .with_surveyor("Mike Davis")
}

fn store() -> MemoryStore {
  MemoryStore::new(vec![
    visit("1", VisitStatus::Confirmed),
    visit("2", VisitStatus::WaitingForConfirmation),
    visit("3", VisitStatus::WaitingForConfirmation),
    visit("4", VisitStatus::Allocated),
  ])
  .expect("store")
}

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("visit-store-{}-{name}", std::process::id()))
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn duplicate_ids_are_rejected() {
  let result = MemoryStore::new(vec![
    visit("1", VisitStatus::Confirmed),
    visit("1", VisitStatus::Complete),
  ]);
  assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "1"));
}

#[test]
fn from_json_parses_an_array() {
  let json = r#"[
    {
      "id": "a",
      "locationName": "Westminster Office Building",
      "postcode": "SW1A 1AA",
      "address": "123 High Street, London",
      "startTime": "09:00",
      "endTime": "11:00",
      "surveyor": { "name": "Mike Davis", "email": "", "phone": "", "discipline": "EL" },
      "status": "confirmed",
      "date": "2026-10-14",
      "visitType": "nbi",
      "siteContacts": [],
      "expectedPlants": [{ "plant": "Fire Alarm System", "estimatedQuantity": 1 }]
    }
  ]"#;
  let s = MemoryStore::from_json(json).unwrap();
  assert_eq!(s.len(), 1);
  let v = s.get("a").unwrap();
  assert_eq!(v.expected_plants()[0].estimated_quantity, 1);
}

#[test]
fn from_json_rejects_unknown_status() {
  let json = r#"[{ "id": "a", "locationName": "", "postcode": "", "address": "",
    "startTime": "09:00", "endTime": "10:00",
    "surveyor": { "name": "", "email": "", "phone": "", "discipline": "" },
    "status": "on-site", "date": "2026-10-14", "visitType": "nbi" }]"#;
  assert!(matches!(MemoryStore::from_json(json), Err(Error::Json(_))));
}

#[test]
fn save_and_open_round_trip_status_changes() {
  let path = temp_path("round-trip.json");
  let mut s = store();
  s.on_visit_status_change("2", VisitStatus::Confirmed);
  s.save(&path).unwrap();

  let reopened = MemoryStore::open(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(reopened.len(), 4);
  assert_eq!(reopened.get("2").unwrap().status, VisitStatus::Confirmed);
}

#[test]
fn open_missing_file_reports_path() {
  let path = temp_path("does-not-exist.json");
  let err = MemoryStore::open(&path).unwrap_err();
  assert!(matches!(&err, Error::Read { path: p, .. } if *p == path));
}

// ─── Status changes ──────────────────────────────────────────────────────────

#[test]
fn set_status_returns_previous() {
  let mut s = store();
  let previous = s.set_status("1", VisitStatus::Complete).unwrap();
  assert_eq!(previous, VisitStatus::Confirmed);
  assert_eq!(s.get("1").unwrap().status, VisitStatus::Complete);
}

#[test]
fn set_status_unknown_id_is_an_error() {
  let mut s = store();
  let err = s.set_status("99", VisitStatus::Complete).unwrap_err();
  assert!(matches!(err, visit_core::Error::UnknownVisitId(id) if id == "99"));
}

#[test]
fn status_callback_with_unknown_id_is_a_no_op() {
  let mut s = store();
  let before = s.visits().to_vec();
  s.on_visit_status_change("99", VisitStatus::Cancelled);
  assert_eq!(s.visits(), before.as_slice());
}

#[test]
fn status_callback_is_last_write_wins() {
  let mut s = store();
  s.on_visit_status_change("1", VisitStatus::Cancelled);
  s.on_visit_status_change("1", VisitStatus::Complete);
  assert_eq!(s.get("1").unwrap().status, VisitStatus::Complete);
}

#[test]
fn awaiting_count_tracks_changes() {
  let mut s = store();
  assert_eq!(s.awaiting_confirmation_count(), 2);
  s.on_visit_status_change("2", VisitStatus::Confirmed);
  assert_eq!(s.awaiting_confirmation_count(), 1);
}

// ─── Actions ─────────────────────────────────────────────────────────────────

#[test]
fn reschedule_moves_visit_back_to_allocated() {
  let mut s = store();
  let status = s.apply_action("3", VisitAction::Reschedule).unwrap();
  assert_eq!(status, VisitStatus::Allocated);
  assert!(!s.get("3").unwrap().is_scheduled());
}

#[test]
fn action_on_confirmed_visit_is_rejected() {
  let mut s = store();
  let err = s.apply_action("1", VisitAction::Decline).unwrap_err();
  assert!(matches!(
    err,
    visit_core::Error::ActionUnavailable {
      action: VisitAction::Decline,
      status: VisitStatus::Confirmed,
    }
  ));
  assert_eq!(s.get("1").unwrap().status, VisitStatus::Confirmed);
}

#[test]
fn action_on_unknown_visit_is_rejected() {
  let mut s = store();
  let err = s.apply_action("99", VisitAction::Confirm).unwrap_err();
  assert!(matches!(err, visit_core::Error::UnknownVisitId(_)));
}
