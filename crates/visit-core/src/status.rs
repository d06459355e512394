//! Visit classification: status, visit type, and the actions a surveyor can
//! take on a visit.
//!
//! Display metadata is attached through exhaustive `match`es, so adding a
//! variant without describing it is a compile error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a visit is in its scheduling lifecycle.
///
/// `Allocated` is the only unscheduled status: the visit has a due date but
/// no day/time slot yet. Every other status occupies a calendar slot.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VisitStatus {
  Allocated,
  NotConfirmed,
  WaitingForConfirmation,
  Confirmed,
  Complete,
  Cancelled,
}

/// How a status is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
  pub label:    &'static str,
  /// Foreground / accent colour as a CSS hex string.
  pub color:    &'static str,
  pub bg_color: &'static str,
  pub tooltip:  &'static str,
}

impl VisitStatus {
  /// `false` only for [`VisitStatus::Allocated`].
  pub fn is_scheduled(self) -> bool { !matches!(self, Self::Allocated) }

  /// Statuses that can appear on a calendar cell, in menu order.
  pub fn scheduled() -> impl Iterator<Item = Self> {
    Self::iter().filter(|s| s.is_scheduled())
  }

  pub fn display(self) -> StatusDisplay {
    match self {
      Self::Allocated => StatusDisplay {
        label:    "Allocated",
        color:    "#FF8800",
        bg_color: "#FFF3E0",
        tooltip:  "Assigned to a surveyor; visit date pending.",
      },
      Self::NotConfirmed => StatusDisplay {
        label:    "Not Confirmed",
        color:    "#FF8800",
        bg_color: "#FFF3E0",
        tooltip:  "Visit scheduled; customer contact not yet initiated.",
      },
      Self::WaitingForConfirmation => StatusDisplay {
        label:    "Waiting for Confirmation",
        color:    "#FF8800",
        bg_color: "#FFF3E0",
        tooltip:  "Customer contacted; awaiting confirmation. Click to respond.",
      },
      Self::Confirmed => StatusDisplay {
        label:    "Confirmed",
        color:    "#0055B8",
        bg_color: "#E3F2FD",
        tooltip:  "Visit date confirmed with the customer.",
      },
      Self::Complete => StatusDisplay {
        label:    "Complete",
        color:    "#008A00",
        bg_color: "#E8F5E9",
        tooltip:  "Inspection completed.",
      },
      Self::Cancelled => StatusDisplay {
        label:    "Cancelled",
        color:    "#D32F2F",
        bg_color: "#FFEBEE",
        tooltip:  "Visit has been cancelled.",
      },
    }
  }

  pub fn label(self) -> &'static str { self.display().label }
}

impl FromStr for VisitStatus {
  type Err = Error;

  /// Parses the kebab-case wire form, e.g. `waiting-for-confirmation`.
  fn from_str(s: &str) -> Result<Self> {
    Self::iter()
      .find(|status| status.as_ref() == s)
      .ok_or_else(|| Error::UnknownStatus(s.to_string()))
  }
}

// ─── Visit type ──────────────────────────────────────────────────────────────

/// The kind of inspection visit.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisitType {
  /// New business inspection: a first visit to a new site.
  Nbi,
  /// Moved-about plant: equipment relocated since the last inspection.
  Map,
  /// Routine re-visit within a surveyor's territory.
  Territory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTypeDisplay {
  pub label:   &'static str,
  pub tooltip: &'static str,
}

impl VisitType {
  pub fn display(self) -> VisitTypeDisplay {
    match self {
      Self::Nbi => VisitTypeDisplay {
        label:   "New Site",
        tooltip: "New Site - Visit",
      },
      Self::Map => VisitTypeDisplay {
        label:   "Moved Equipment",
        tooltip: "Moved About Plant - Visit",
      },
      Self::Territory => VisitTypeDisplay {
        label:   "Routine",
        tooltip: "Re-visit",
      },
    }
  }
}

// ─── Actions ─────────────────────────────────────────────────────────────────

/// A response to a visit that is waiting for confirmation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisitAction {
  Confirm,
  Decline,
  Reschedule,
}

impl VisitAction {
  /// The status a visit moves to once the action is applied.
  pub fn target_status(self) -> VisitStatus {
    match self {
      Self::Confirm => VisitStatus::Confirmed,
      Self::Decline => VisitStatus::Cancelled,
      Self::Reschedule => VisitStatus::Allocated,
    }
  }

  /// Actions are only offered while the customer's answer is pending.
  pub fn is_available_for(self, status: VisitStatus) -> bool {
    status == VisitStatus::WaitingForConfirmation
  }

  /// Returns the target status, or [`Error::ActionUnavailable`].
  pub fn check(self, status: VisitStatus) -> Result<VisitStatus> {
    if self.is_available_for(status) {
      Ok(self.target_status())
    } else {
      Err(Error::ActionUnavailable { action: self, status })
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Confirm => "Confirm Visit",
      Self::Decline => "Decline Visit",
      Self::Reschedule => "Request Reschedule",
    }
  }

  /// The question shown before the action is applied. `when` describes the
  /// visit slot, e.g. `Wednesday, 14 October 2026 at 09:00`.
  pub fn prompt(self, when: &str) -> String {
    match self {
      Self::Confirm => {
        format!("Are you sure you want to confirm this visit for {when}?")
      }
      Self::Decline => "Are you sure you want to decline this visit? The \
                        scheduling team will be notified."
        .to_string(),
      Self::Reschedule => "Are you sure you want to request a reschedule? The \
                           scheduling team will contact you to arrange a new \
                           time."
        .to_string(),
    }
  }

  pub fn success_message(self) -> &'static str {
    match self {
      Self::Confirm => "Visit confirmed successfully",
      Self::Decline => "Visit declined. The team will be notified.",
      Self::Reschedule => "Reschedule request sent. The team will contact you.",
    }
  }
}

impl FromStr for VisitAction {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::iter()
      .find(|action| action.as_ref() == s)
      .ok_or_else(|| Error::UnknownAction(s.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_round_trips_through_kebab_case() {
    for status in VisitStatus::iter() {
      let parsed: VisitStatus = status.to_string().parse().unwrap();
      assert_eq!(parsed, status);
    }
    assert_eq!(
      "waiting-for-confirmation".parse::<VisitStatus>().unwrap(),
      VisitStatus::WaitingForConfirmation
    );
  }

  #[test]
  fn unknown_status_is_rejected() {
    let err = "on-site".parse::<VisitStatus>().unwrap_err();
    assert!(matches!(err, Error::UnknownStatus(s) if s == "on-site"));
  }

  #[test]
  fn serde_uses_kebab_case() {
    let json = serde_json::to_string(&VisitStatus::NotConfirmed).unwrap();
    assert_eq!(json, "\"not-confirmed\"");
    let back: VisitType = serde_json::from_str("\"territory\"").unwrap();
    assert_eq!(back, VisitType::Territory);
  }

  #[test]
  fn scheduled_excludes_allocated() {
    let scheduled: Vec<_> = VisitStatus::scheduled().collect();
    assert_eq!(scheduled.len(), 5);
    assert!(!scheduled.contains(&VisitStatus::Allocated));
    assert_eq!(scheduled[0], VisitStatus::NotConfirmed);
  }

  #[test]
  fn every_status_has_a_label() {
    for status in VisitStatus::iter() {
      let d = status.display();
      assert!(!d.label.is_empty());
      assert!(d.color.starts_with('#'));
    }
    assert_eq!(VisitType::Map.display().label, "Moved Equipment");
  }

  #[test]
  fn actions_only_apply_while_waiting() {
    let waiting = VisitStatus::WaitingForConfirmation;
    assert_eq!(VisitAction::Confirm.check(waiting).unwrap(), VisitStatus::Confirmed);
    assert_eq!(VisitAction::Decline.check(waiting).unwrap(), VisitStatus::Cancelled);
    assert_eq!(
      VisitAction::Reschedule.check(waiting).unwrap(),
      VisitStatus::Allocated
    );

    let err = VisitAction::Confirm.check(VisitStatus::Confirmed).unwrap_err();
    assert_eq!(err.to_string(), "cannot confirm a visit that is confirmed");
  }

  #[test]
  fn confirm_prompt_names_the_slot() {
    let prompt = VisitAction::Confirm.prompt("Monday, 12 October 2026 at 09:00");
    assert!(prompt.ends_with("for Monday, 12 October 2026 at 09:00?"));
  }
}
