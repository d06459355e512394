//! View modes and navigation direction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use visit_core::Error;

/// How many days the calendar shows at once.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
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
pub enum ViewMode {
  /// The reference day only.
  Today,
  /// Monday to Friday of the reference week.
  #[default]
  WorkingWeek,
  /// Sunday to Saturday of the reference week.
  Week,
  /// Whole weeks covering the reference month.
  Month,
}

impl ViewMode {
  pub fn label(self) -> &'static str {
    match self {
      Self::Today => "Today",
      Self::WorkingWeek => "Working Week",
      Self::Week => "Week",
      Self::Month => "Month",
    }
  }
}

impl FromStr for ViewMode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    Self::iter()
      .find(|mode| mode.as_ref() == s)
      .ok_or_else(|| Error::UnknownViewMode(s.to_string()))
  }
}

/// Which way the previous/next buttons move the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Previous,
  Next,
}
