//! [`CalendarState`]: the host-owned working state of the calendar.

use chrono::NaiveDate;
use visit_core::{Visit, VisitStatus};

use crate::{
  engine::{self, CalendarView},
  filter::{StatusFilter, SurveyorFilter},
  view::{Direction, ViewMode},
};

/// Reference date, view mode and filters.
///
/// The state is plain data. Every change is followed by a fresh
/// [`CalendarState::view`]; nothing derived is cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
  pub reference_date:  NaiveDate,
  pub view_mode:       ViewMode,
  pub status_filter:   StatusFilter,
  pub surveyor_filter: SurveyorFilter,
}

impl CalendarState {
  /// Working-week view on `today`, no filters.
  pub fn new(today: NaiveDate) -> Self {
    Self {
      reference_date:  today,
      view_mode:       ViewMode::default(),
      status_filter:   StatusFilter::All,
      surveyor_filter: SurveyorFilter::All,
    }
  }

  pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
    self.view_mode = view_mode;
    self
  }

  pub fn navigate(&mut self, direction: Direction) {
    self.reference_date =
      engine::navigate(self.reference_date, self.view_mode, direction);
  }

  /// Jump back to `today`, keeping the view mode.
  pub fn go_to_today(&mut self, today: NaiveDate) { self.reference_date = today; }

  /// Open the single-day view for `day` (the month cell's "more visits"
  /// affordance).
  pub fn go_to_day_view(&mut self, day: NaiveDate) {
    self.reference_date = day;
    self.view_mode = ViewMode::Today;
  }

  /// Show only visits waiting for the customer to confirm.
  pub fn focus_awaiting_confirmation(&mut self) {
    self.status_filter = StatusFilter::Only(VisitStatus::WaitingForConfirmation);
  }

  pub fn clear_filters(&mut self) {
    self.status_filter = StatusFilter::All;
    self.surveyor_filter = SurveyorFilter::All;
  }

  /// Whether the "Filter applied" indicator should show.
  pub fn is_filtered(&self) -> bool {
    !self.status_filter.is_all() || !self.surveyor_filter.is_all()
  }

  pub fn visible_days(&self) -> Vec<NaiveDate> {
    engine::visible_days(self.reference_date, self.view_mode)
  }

  pub fn title(&self) -> String {
    engine::header_title(self.reference_date, self.view_mode)
  }

  pub fn view<'a>(&self, visits: &'a [Visit], today: NaiveDate) -> CalendarView<'a> {
    engine::calendar_view(visits, self, today)
  }
}
