//! [`Dashboard`]: the owner that ties a visit store, the calendar state and
//! the awaiting-confirmation banner together.

use std::{collections::BTreeSet, time::Duration};

use chrono::NaiveDate;
use tokio::sync::mpsc;
use visit_core::{Result, Visit, VisitAction, VisitStatus, VisitStore};

use crate::{
  banner::{Banner, BannerEvent, BannerState, BannerTimer},
  engine::{self, CalendarView},
  state::CalendarState,
};

/// Host-side controller for one calendar widget.
///
/// Must be created and mutated from within a Tokio runtime, since the banner
/// arms real timers.
pub struct Dashboard<S> {
  store:          S,
  pub calendar:   CalendarState,
  banner:         BannerTimer,
  awaiting_count: usize,
}

impl<S: VisitStore> Dashboard<S> {
  /// Build a dashboard and arm the banner for the visits currently awaiting
  /// confirmation. Banner events arrive on the returned receiver.
  pub fn new(
    store: S,
    today: NaiveDate,
    banner_duration: Duration,
  ) -> (Self, mpsc::UnboundedReceiver<BannerEvent>) {
    let (mut banner, events) = BannerTimer::new(banner_duration);
    let awaiting_count = store.awaiting_confirmation_count();
    banner.arm(awaiting_count);
    let dashboard = Self {
      store,
      calendar: CalendarState::new(today),
      banner,
      awaiting_count,
    };
    (dashboard, events)
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn into_store(self) -> S { self.store }

  pub fn visits(&self) -> &[Visit] { self.store.visits() }

  pub fn view(&self, today: NaiveDate) -> CalendarView<'_> {
    self.calendar.view(self.store.visits(), today)
  }

  pub fn unscheduled(&self) -> Vec<&Visit> {
    engine::unscheduled_visits(self.store.visits())
  }

  pub fn surveyors(&self) -> BTreeSet<String> {
    engine::distinct_surveyor_names(self.store.visits())
  }

  pub fn awaiting_count(&self) -> usize { self.awaiting_count }

  // ── Status changes ──────────────────────────────────────────────────────

  /// The callback handed to detail panels. Unknown ids are ignored.
  pub fn on_visit_status_change(&mut self, visit_id: &str, status: VisitStatus) {
    self.store.on_visit_status_change(visit_id, status);
    self.refresh_banner();
  }

  /// Confirm, decline or reschedule a visit awaiting confirmation.
  pub fn apply_action(
    &mut self,
    visit_id: &str,
    action: VisitAction,
  ) -> Result<VisitStatus> {
    let status = self.store.apply_action(visit_id, action)?;
    tracing::info!(visit_id, %action, %status, "{}", action.success_message());
    self.refresh_banner();
    Ok(status)
  }

  /// Keep the banner in step with the store. A new cycle starts only when
  /// the count rises from zero after the previous cycle has ended; while a
  /// cycle is still running it just picks up the new count.
  fn refresh_banner(&mut self) {
    let previous = self.awaiting_count;
    let current = self.store.awaiting_confirmation_count();
    self.awaiting_count = current;

    if previous == 0 && current > 0 && !self.banner.is_pending() {
      tracing::debug!(current, "visits awaiting confirmation again, re-arming banner");
      self.banner.arm(current);
    } else {
      self.banner.set_count(current);
    }
  }

  // ── Banner ──────────────────────────────────────────────────────────────

  pub fn banner_state(&self) -> BannerState { self.banner.state() }

  /// A copy of the current banner cycle, for rendering.
  pub fn banner(&self) -> Banner { self.banner.snapshot() }

  pub fn banner_message(&self) -> String { self.banner.snapshot().message() }

  /// Banner click: narrow the calendar to visits awaiting confirmation.
  pub fn banner_clicked(&mut self) { self.calendar.focus_awaiting_confirmation(); }

  pub fn dismiss_banner(&mut self) -> bool { self.banner.dismiss() }
}
