//! Plain-text rendering, one function per pane.

pub mod calendar;
pub mod visit_detail;

use std::{collections::BTreeSet, fmt::Write as _};

use visit_calendar::{Banner, BannerState};
use visit_core::Visit;

// ─── Banner ───────────────────────────────────────────────────────────────────

/// The notice line, or `None` while the banner is hidden.
pub fn banner(banner: &Banner) -> Option<String> {
  let suffix = match banner.state() {
    BannerState::Hidden => return None,
    BannerState::VisibleActive => "",
    BannerState::VisibleFading => " (fading)",
  };
  Some(format!(
    "! {}. Type `banner` to view them, `dismiss` to hide{suffix}",
    banner.message()
  ))
}

// ─── Visit lines ──────────────────────────────────────────────────────────────

/// `09:00 - 11:00  Westminster Office Building, SW1A 1AA  Mike Davis  [Confirmed]`
pub fn visit_line(visit: &Visit) -> String {
  format!(
    "{}  {}, {}  {}  [{}]  #{}",
    visit.time_range(),
    visit.location_name,
    visit.postcode,
    visit.surveyor_name(),
    visit.status.label(),
    visit.id,
  )
}

pub fn unscheduled(visits: &[&Visit]) -> String {
  let mut out = format!("Unscheduled Visits ({})\n", visits.len());
  if visits.is_empty() {
    out.push_str("  No unscheduled visits\n");
    return out;
  }
  for visit in visits {
    let due = visit
      .day()
      .map(|d| d.format("%d %b %Y").to_string())
      .unwrap_or_else(|_| format!("{:?}", visit.date.as_str()));
    writeln!(
      out,
      "  due {due}  {}, {}  {}  #{}",
      visit.location_name,
      visit.postcode,
      visit.surveyor_name(),
      visit.id
    )
    .ok();
  }
  out
}

pub fn surveyors(names: &BTreeSet<String>) -> String {
  let mut out = String::from("Surveyors\n  all\n");
  for name in names {
    writeln!(out, "  {name}").ok();
  }
  out
}
