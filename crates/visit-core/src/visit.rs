//! The visit record and its supporting value types.
//!
//! Field names follow the host's JSON interchange format (camelCase). Records
//! are owned by a [`VisitStore`](crate::store::VisitStore); calendar code only
//! reads them.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  status::{VisitStatus, VisitType},
};

// ─── Date ────────────────────────────────────────────────────────────────────

/// The calendar day a visit is booked on (or due by, when unscheduled), as
/// supplied by the host.
///
/// The raw value is kept so that a malformed date is carried through instead
/// of rejecting the whole visit list. [`VisitDate::day`] resolves it; any
/// time-of-day component is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitDate(String);

impl VisitDate {
  pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Resolve to a local calendar day.
  ///
  /// Accepts `2026-10-14`, `2026-10-14T09:30[:00[.000]]` and RFC 3339
  /// timestamps. An RFC 3339 instant is converted to the local time zone
  /// first, so it lands on the local wall-clock day.
  pub fn day(&self) -> Result<NaiveDate> {
    let raw = self.0.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
      return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
      return Ok(ts.with_timezone(&Local).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
      if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
        return Ok(ts.date());
      }
    }
    Err(Error::InvalidDate(self.0.clone()))
  }
}

impl From<&str> for VisitDate {
  fn from(raw: &str) -> Self { Self(raw.to_string()) }
}

impl From<String> for VisitDate {
  fn from(raw: String) -> Self { Self(raw) }
}

impl From<NaiveDate> for VisitDate {
  fn from(date: NaiveDate) -> Self { Self(date.format("%Y-%m-%d").to_string()) }
}

// ─── People ──────────────────────────────────────────────────────────────────

/// The surveyor assigned to carry out the inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surveyor {
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  /// Engineering discipline code, e.g. `EL` (electrical) or `LI` (lifts).
  pub discipline: String,
}

/// A customer-side contact at the inspected site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContact {
  pub name:          String,
  pub discipline:    String,
  pub phone_number:  String,
  pub mobile_number: String,
  pub email_address: String,
  /// e.g. "Primary Contact".
  pub position:      String,
}

/// A contact at the site equipment was moved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSiteContact {
  pub name:          String,
  pub phone_number:  String,
  pub mobile_number: String,
}

// ─── Equipment ───────────────────────────────────────────────────────────────

/// Where moved equipment is now located.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledLocation {
  pub name:     String,
  pub address:  String,
  pub postcode: String,
}

/// Plant the surveyor should expect to find on a new site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedPlant {
  pub plant:              String,
  pub estimated_quantity: u32,
}

/// An asset due for inspection during the visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionItem {
  pub id:                String,
  /// Report number of the most recent inspection.
  pub current_report:    String,
  pub serial_no:         String,
  pub plant_no:          String,
  pub plant_description: String,
  pub discipline:        String,
  pub last_inspected:    String,
  pub defect_code:       String,
  pub next_due:          String,
}

// ─── Visit ───────────────────────────────────────────────────────────────────

/// A scheduled or unscheduled inspection visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
  pub id:            String,
  pub location_name: String,
  pub postcode:      String,
  pub address:       String,
  /// `"HH:MM"`, 24-hour, zero-padded. Compared as a string, never parsed.
  pub start_time:    String,
  pub end_time:      String,
  pub surveyor:      Surveyor,
  pub status:        VisitStatus,
  pub date:          VisitDate,
  pub visit_type:    VisitType,

  #[serde(default)]
  pub items:              Vec<InspectionItem>,
  #[serde(default)]
  pub site_contacts:      Vec<SiteContact>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub map_site_contacts:  Vec<MapSiteContact>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scheduled_location: Option<ScheduledLocation>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub expected_plants:    Vec<ExpectedPlant>,
}

impl Visit {
  /// Minimal constructor; descriptive fields are left empty.
  pub fn new(
    id: impl Into<String>,
    date: impl Into<VisitDate>,
    start_time: impl Into<String>,
    end_time: impl Into<String>,
    status: VisitStatus,
    visit_type: VisitType,
  ) -> Self {
    Self {
      id: id.into(),
      location_name: String::new(),
      postcode: String::new(),
      address: String::new(),
      start_time: start_time.into(),
      end_time: end_time.into(),
      surveyor: Surveyor::default(),
      status,
      date: date.into(),
      visit_type,
      items: Vec::new(),
      site_contacts: Vec::new(),
      map_site_contacts: Vec::new(),
      scheduled_location: None,
      expected_plants: Vec::new(),
    }
  }

  /// Builder-style setter for the assigned surveyor's name.
  pub fn with_surveyor(mut self, name: impl Into<String>) -> Self {
    self.surveyor.name = name.into();
    self
  }

  /// The calendar day of the visit; see [`VisitDate::day`].
  pub fn day(&self) -> Result<NaiveDate> { self.date.day() }

  /// `false` for allocated (due-date-only) visits.
  pub fn is_scheduled(&self) -> bool { self.status.is_scheduled() }

  pub fn surveyor_name(&self) -> &str { &self.surveyor.name }

  /// Contacts at the relocation site; empty unless this is a `map` visit.
  pub fn map_site_contacts(&self) -> &[MapSiteContact] {
    match self.visit_type {
      VisitType::Map => &self.map_site_contacts,
      _ => &[],
    }
  }

  /// Relocation site; `None` unless this is a `map` visit.
  pub fn scheduled_location(&self) -> Option<&ScheduledLocation> {
    match self.visit_type {
      VisitType::Map => self.scheduled_location.as_ref(),
      _ => None,
    }
  }

  /// Expected plant; empty unless this is an `nbi` visit.
  pub fn expected_plants(&self) -> &[ExpectedPlant] {
    match self.visit_type {
      VisitType::Nbi => &self.expected_plants,
      _ => &[],
    }
  }

  /// `09:00 - 11:00`
  pub fn time_range(&self) -> String {
    format!("{} - {}", self.start_time, self.end_time)
  }
}
