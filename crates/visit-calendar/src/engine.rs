//! The calendar engine: visible date ranges, navigation and day bucketing.
//!
//! Weeks start on Sunday. All functions are pure; "today" is always passed
//! in by the caller except in [`today`] itself.

use std::{collections::BTreeSet, iter};

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use visit_core::Visit;

use crate::{
  filter::{StatusFilter, SurveyorFilter},
  state::CalendarState,
  view::{Direction, ViewMode},
};

// ─── Dates ───────────────────────────────────────────────────────────────────

/// The current local calendar day.
pub fn today() -> NaiveDate { Local::now().date_naive() }

/// The Sunday on or before `day`, or [`NaiveDate::MIN`] when that Sunday is
/// out of range.
pub fn week_start(day: NaiveDate) -> NaiveDate {
  day
    .checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_sunday())))
    .unwrap_or(NaiveDate::MIN)
}

/// The Saturday on or after `day`, or [`NaiveDate::MAX`] when that Saturday
/// is out of range.
pub fn week_end(day: NaiveDate) -> NaiveDate {
  day
    .checked_add_days(Days::new(u64::from(6 - day.weekday().num_days_from_sunday())))
    .unwrap_or(NaiveDate::MAX)
}

fn month_start(day: NaiveDate) -> NaiveDate { day.with_day(1).unwrap_or(day) }

fn month_end(day: NaiveDate) -> NaiveDate {
  let first = month_start(day);
  days_from(first)
    .take_while(|d| d.month() == first.month())
    .last()
    .unwrap_or(first)
}

/// `start` and every following day, up to and including [`NaiveDate::MAX`].
fn days_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
  iter::successors(Some(start), |d| d.succ_opt())
}

/// Every day from `start` to `end` inclusive.
fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
  days_from(start).take_while(move |d| *d <= end)
}

/// The days shown for `view_mode` around `reference`, in ascending order.
///
/// Near the ends of chrono's date range the grid is cut short to the days
/// that exist.
pub fn visible_days(reference: NaiveDate, view_mode: ViewMode) -> Vec<NaiveDate> {
  match view_mode {
    ViewMode::Today => vec![reference],
    ViewMode::WorkingWeek => days_between(week_start(reference), week_end(reference))
      .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
      .collect(),
    ViewMode::Week => days_between(week_start(reference), week_end(reference)).collect(),
    ViewMode::Month => {
      let start = week_start(month_start(reference));
      let end = week_end(month_end(reference));
      days_between(start, end).collect()
    }
  }
}

/// Move the reference date one step in `direction`.
///
/// Month steps clamp the day of month (31 January → 28/29 February), so a
/// month forward followed by a month back does not always return to the same
/// day. At the edge of the representable range the date is left unchanged.
pub fn navigate(
  reference: NaiveDate,
  view_mode: ViewMode,
  direction: Direction,
) -> NaiveDate {
  let moved = match (view_mode, direction) {
    (ViewMode::Today, Direction::Next) => reference.checked_add_days(Days::new(1)),
    (ViewMode::Today, Direction::Previous) => reference.checked_sub_days(Days::new(1)),
    (ViewMode::WorkingWeek | ViewMode::Week, Direction::Next) => {
      reference.checked_add_days(Days::new(7))
    }
    (ViewMode::WorkingWeek | ViewMode::Week, Direction::Previous) => {
      reference.checked_sub_days(Days::new(7))
    }
    (ViewMode::Month, Direction::Next) => reference.checked_add_months(Months::new(1)),
    (ViewMode::Month, Direction::Previous) => {
      reference.checked_sub_months(Months::new(1))
    }
  };
  moved.unwrap_or(reference)
}

/// The calendar header for the current range.
pub fn header_title(reference: NaiveDate, view_mode: ViewMode) -> String {
  match view_mode {
    ViewMode::Today => reference.format("%A, %d %B %Y").to_string(),
    ViewMode::WorkingWeek | ViewMode::Week => format!(
      "{} - {}",
      week_start(reference).format("%d %b"),
      week_end(reference).format("%d %b %Y"),
    ),
    ViewMode::Month => reference.format("%B %Y").to_string(),
  }
}

// ─── Visits ──────────────────────────────────────────────────────────────────

/// The scheduled visits on `day` that pass both filters, ordered by start
/// time.
///
/// Allocated visits never appear. A visit whose date cannot be resolved
/// matches no day. Equal start times keep their input order.
pub fn visits_for_day<'a>(
  visits: &'a [Visit],
  day: NaiveDate,
  status: StatusFilter,
  surveyor: &SurveyorFilter,
) -> Vec<&'a Visit> {
  let mut matched: Vec<&Visit> = visits
    .iter()
    .filter(|v| v.is_scheduled())
    .filter(|v| match v.day() {
      Ok(d) => d == day,
      Err(e) => {
        tracing::trace!(visit_id = %v.id, error = %e, "skipping visit");
        false
      }
    })
    .filter(|v| status.matches(v))
    .filter(|v| surveyor.matches(v))
    .collect();
  matched.sort_by(|a, b| a.start_time.cmp(&b.start_time));
  matched
}

/// Allocated visits, earliest due date first.
///
/// Visits with an unresolvable date are still listed, after all dated ones.
pub fn unscheduled_visits(visits: &[Visit]) -> Vec<&Visit> {
  let mut unscheduled: Vec<&Visit> =
    visits.iter().filter(|v| !v.is_scheduled()).collect();
  unscheduled.sort_by_cached_key(|v| {
    let day = v.day().ok();
    (day.is_none(), day)
  });
  unscheduled
}

/// Surveyor names on scheduled visits, alphabetically.
pub fn distinct_surveyor_names(visits: &[Visit]) -> BTreeSet<String> {
  visits
    .iter()
    .filter(|v| v.is_scheduled())
    .map(|v| v.surveyor_name().to_string())
    .collect()
}

// ─── Calendar view ───────────────────────────────────────────────────────────

/// Month-view summary of a day: only the first visit is shown, with a count
/// of the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collapsed<'a> {
  pub visible_visit:  &'a Visit,
  pub overflow_count: usize,
}

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
  pub date:               NaiveDate,
  /// Every matching visit, ordered by start time.
  pub visits:             Vec<&'a Visit>,
  /// Set in month view when the day has at least one visit.
  pub collapsed:          Option<Collapsed<'a>>,
  pub is_today:           bool,
  /// `false` for the leading/trailing days a month grid borrows from
  /// neighbouring months.
  pub in_reference_month: bool,
}

impl DayCell<'_> {
  /// The visits a cell renders: everything, or the single visible visit in
  /// month view.
  pub fn displayed(&self) -> &[&Visit] {
    match self.collapsed {
      Some(_) => &self.visits[..1],
      None => &self.visits,
    }
  }

  pub fn overflow_count(&self) -> usize {
    self.collapsed.map_or(0, |c| c.overflow_count)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView<'a> {
  pub title:     String,
  pub view_mode: ViewMode,
  pub days:      Vec<DayCell<'a>>,
}

/// Compute the whole calendar for `state`.
pub fn calendar_view<'a>(
  visits: &'a [Visit],
  state: &CalendarState,
  today: NaiveDate,
) -> CalendarView<'a> {
  let reference = state.reference_date;
  let days = visible_days(reference, state.view_mode)
    .into_iter()
    .map(|date| {
      let day_visits =
        visits_for_day(visits, date, state.status_filter, &state.surveyor_filter);
      let collapsed = match (state.view_mode, day_visits.first()) {
        (ViewMode::Month, Some(&first)) => Some(Collapsed {
          visible_visit:  first,
          overflow_count: day_visits.len() - 1,
        }),
        _ => None,
      };
      DayCell {
        date,
        visits: day_visits,
        collapsed,
        is_today: date == today,
        in_reference_month: date.year() == reference.year()
          && date.month() == reference.month(),
      }
    })
    .collect();

  CalendarView {
    title: header_title(reference, state.view_mode),
    view_mode: state.view_mode,
    days,
  }
}

/// `+1 more visit`, `+3 more visits`.
pub fn overflow_label(count: usize) -> String {
  let noun = if count == 1 { "visit" } else { "visits" };
  format!("+{count} more {noun}")
}
