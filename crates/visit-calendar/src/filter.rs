//! Status and surveyor filters.
//!
//! Both filters are either `all` (pass-through) or a single concrete value.

use std::{fmt, str::FromStr};

use visit_core::{Error, Visit, VisitStatus};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
  #[default]
  All,
  Only(VisitStatus),
}

impl StatusFilter {
  pub fn matches(self, visit: &Visit) -> bool {
    match self {
      Self::All => true,
      Self::Only(status) => visit.status == status,
    }
  }

  pub fn is_all(self) -> bool { matches!(self, Self::All) }

  /// The choices offered in the status menu: `all` followed by every status
  /// that can appear on a calendar cell.
  pub fn options() -> impl Iterator<Item = Self> {
    std::iter::once(Self::All).chain(VisitStatus::scheduled().map(Self::Only))
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "All",
      Self::Only(status) => status.label(),
    }
  }
}

impl fmt::Display for StatusFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("all"),
      Self::Only(status) => write!(f, "{status}"),
    }
  }
}

impl FromStr for StatusFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "all" => Ok(Self::All),
      other => other.parse().map(Self::Only),
    }
  }
}

// ─── Surveyor ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SurveyorFilter {
  #[default]
  All,
  /// Exact, case-sensitive surveyor name.
  Only(String),
}

impl SurveyorFilter {
  pub fn matches(&self, visit: &Visit) -> bool {
    match self {
      Self::All => true,
      Self::Only(name) => visit.surveyor_name() == name,
    }
  }

  pub fn is_all(&self) -> bool { matches!(self, Self::All) }
}

impl fmt::Display for SurveyorFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("all"),
      Self::Only(name) => f.write_str(name),
    }
  }
}

impl From<&str> for SurveyorFilter {
  fn from(s: &str) -> Self {
    match s {
      "all" => Self::All,
      name => Self::Only(name.to_string()),
    }
  }
}
