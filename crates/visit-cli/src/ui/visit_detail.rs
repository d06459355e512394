//! Detail pane for a single visit.

use std::fmt::Write as _;

use visit_core::{Visit, VisitAction};

/// `Wednesday, 14 October 2026 at 09:00`, or the raw date when it can't be
/// parsed.
pub fn slot(visit: &Visit) -> String {
  let day = visit
    .day()
    .map(|d| d.format("%A, %d %B %Y").to_string())
    .unwrap_or_else(|_| visit.date.as_str().to_string());
  format!("{day} at {}", visit.start_time)
}

pub fn render(visit: &Visit) -> String {
  let mut out = String::new();
  let status = visit.status.display();
  let kind = visit.visit_type.display();

  writeln!(out, "{} ({})", visit.location_name, visit.postcode).ok();
  if !visit.address.is_empty() {
    writeln!(out, "  {}", visit.address).ok();
  }
  writeln!(out, "  Id:       {}", visit.id).ok();
  writeln!(out, "  When:     {} ({})", slot(visit), visit.time_range()).ok();
  writeln!(out, "  Status:   {} - {}", status.label, status.tooltip).ok();
  writeln!(out, "  Type:     {} - {}", kind.label, kind.tooltip).ok();

  let surveyor = &visit.surveyor;
  if !surveyor.name.is_empty() {
    writeln!(
      out,
      "  Surveyor: {} [{}] {} {}",
      surveyor.name, surveyor.discipline, surveyor.phone, surveyor.email
    )
    .ok();
  }

  if !visit.site_contacts.is_empty() {
    out.push_str("\nSite contacts\n");
    for contact in &visit.site_contacts {
      writeln!(
        out,
        "  {} ({}, {})  {}  {}  {}",
        contact.name,
        contact.position,
        contact.discipline,
        contact.phone_number,
        contact.mobile_number,
        contact.email_address
      )
      .ok();
    }
  }

  if let Some(location) = visit.scheduled_location() {
    writeln!(
      out,
      "\nEquipment moved to\n  {}, {} ({})",
      location.name, location.address, location.postcode
    )
    .ok();
  }
  let map_contacts = visit.map_site_contacts();
  if !map_contacts.is_empty() {
    out.push_str("\nNew site contacts\n");
    for contact in map_contacts {
      writeln!(
        out,
        "  {}  {}  {}",
        contact.name, contact.phone_number, contact.mobile_number
      )
      .ok();
    }
  }

  let plants = visit.expected_plants();
  if !plants.is_empty() {
    out.push_str("\nExpected plant\n");
    for plant in plants {
      writeln!(out, "  {} x{}", plant.plant, plant.estimated_quantity).ok();
    }
  }

  if !visit.items.is_empty() {
    writeln!(out, "\nItems ({})", visit.items.len()).ok();
    for item in &visit.items {
      writeln!(
        out,
        "  {}  {} ({})  serial {}  last {}  next {}  defect {}",
        item.plant_no,
        item.plant_description,
        item.discipline,
        item.serial_no,
        item.last_inspected,
        item.next_due,
        item.defect_code,
      )
      .ok();
    }
  }

  let actions: Vec<_> = [VisitAction::Confirm, VisitAction::Decline, VisitAction::Reschedule]
    .into_iter()
    .filter(|action| action.is_available_for(visit.status))
    .collect();
  if !actions.is_empty() {
    out.push_str("\nActions\n");
    for action in actions {
      writeln!(out, "  {:<10} {}", action.to_string(), action.title()).ok();
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use visit_core::{VisitStatus, VisitType, visit::ExpectedPlant};

  use super::*;

  fn visit(status: VisitStatus, visit_type: VisitType) -> Visit {
    let mut visit = Visit::new("v1", "2026-10-14", "09:00", "11:00", status, visit_type)
      .with_surveyor("Mike Davis");
    visit.location_name = "Westminster Office Building".into();
    visit.postcode = "SW1A 1AA".into();
    visit.expected_plants = vec![ExpectedPlant {
      plant:              "Passenger lift".into(),
      estimated_quantity: 2,
    }];
    visit
  }

  #[test]
  fn slot_reads_as_a_sentence() {
    let v = visit(VisitStatus::Confirmed, VisitType::Nbi);
    assert_eq!(slot(&v), "Wednesday, 14 October 2026 at 09:00");
  }

  #[test]
  fn actions_listed_only_while_awaiting_confirmation() {
    let waiting = render(&visit(VisitStatus::WaitingForConfirmation, VisitType::Nbi));
    assert!(waiting.contains("Actions"));
    assert!(waiting.contains("Request Reschedule"));

    let confirmed = render(&visit(VisitStatus::Confirmed, VisitType::Nbi));
    assert!(!confirmed.contains("Actions"));
  }

  #[test]
  fn type_specific_sections_follow_visit_type() {
    let nbi = render(&visit(VisitStatus::Confirmed, VisitType::Nbi));
    assert!(nbi.contains("Passenger lift x2"));

    let territory = render(&visit(VisitStatus::Confirmed, VisitType::Territory));
    assert!(!territory.contains("Expected plant"));
  }
}
