//! Interactive shell: a line-oriented command dispatcher over a [`Dashboard`].

use std::{fmt::Write as _, path::PathBuf, time::Duration};

use chrono::NaiveDate;
use visit_calendar::{
  BannerEvent, Dashboard, Direction, Dismissal, StatusFilter, SurveyorFilter, ViewMode,
};
use visit_core::{VisitAction, VisitStatus, VisitStore as _};
use visit_store::MemoryStore;

use crate::ui;

const HELP: &str = "\
Navigation:  next | prev | today | view <today|working-week|week|month> | day <YYYY-MM-DD>
Filters:     status <all|status> | surveyor <all|name> | clear
Lists:       unscheduled | surveyors | show <id>
Actions:     confirm <id> | decline <id> | reschedule <id> | set <id> <status>
Banner:      banner | dismiss
Other:       save | help | quit
";

/// An action waiting for the user's `yes`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingAction {
  visit_id: String,
  action:   VisitAction,
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App {
  pub dashboard: Dashboard<MemoryStore>,

  /// Where `save` writes the visit list.
  pub data_path: PathBuf,

  /// The current date, refreshed by the host before each command.
  pub today: NaiveDate,

  pending: Option<PendingAction>,

  /// Text produced since the last [`App::take_output`].
  output: String,
}

impl App {
  /// Build the shell and arm the awaiting-confirmation banner.
  pub fn new(
    store: MemoryStore,
    data_path: PathBuf,
    today: NaiveDate,
    default_view: ViewMode,
    banner_duration: Duration,
  ) -> (Self, tokio::sync::mpsc::UnboundedReceiver<BannerEvent>) {
    let (mut dashboard, events) = Dashboard::new(store, today, banner_duration);
    dashboard.calendar.view_mode = default_view;
    let app = Self {
      dashboard,
      data_path,
      today,
      pending: None,
      output: String::new(),
    };
    (app, events)
  }

  pub fn take_output(&mut self) -> String { std::mem::take(&mut self.output) }

  /// Banner line followed by the calendar pane.
  pub fn render(&mut self) {
    if let Some(line) = ui::banner(&self.dashboard.banner()) {
      writeln!(self.output, "{line}").ok();
    }
    let view = self.dashboard.view(self.today);
    let text = ui::calendar::render(&view, &self.dashboard.calendar);
    self.output.push_str(&text);
  }

  // ── Banner events ─────────────────────────────────────────────────────────

  pub fn handle_banner_event(&mut self, event: BannerEvent) {
    match event {
      BannerEvent::Fading => {
        if let Some(line) = ui::banner(&self.dashboard.banner()) {
          writeln!(self.output, "{line}").ok();
        }
      }
      BannerEvent::Dismissed(Dismissal::Expired) => {
        tracing::debug!("banner expired");
      }
      BannerEvent::Dismissed(Dismissal::Manual) => {
        tracing::debug!("banner dismissed");
      }
    }
  }

  // ── Commands ──────────────────────────────────────────────────────────────

  /// Handle one input line. Returns `Ok(false)` when the shell should exit.
  pub fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
    let line = line.trim();
    if line.is_empty() {
      return Ok(true);
    }

    if let Some(pending) = self.pending.take() {
      if matches!(line, "y" | "yes") {
        self.apply(&pending.visit_id, pending.action);
      } else {
        writeln!(self.output, "Cancelled").ok();
      }
      return Ok(true);
    }

    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
      "q" | "quit" | "exit" => return Ok(false),
      "help" | "?" => self.output.push_str(HELP),

      "next" | "n" => self.navigate(Direction::Next),
      "prev" | "p" => self.navigate(Direction::Previous),
      "today" => {
        self.dashboard.calendar.go_to_today(self.today);
        self.render();
      }
      "view" => match rest.parse::<ViewMode>() {
        Ok(mode) => {
          self.dashboard.calendar.view_mode = mode;
          self.render();
        }
        Err(e) => self.error(e),
      },
      "day" => match rest.parse::<NaiveDate>() {
        Ok(day) => {
          self.dashboard.calendar.go_to_day_view(day);
          self.render();
        }
        Err(e) => self.error(format!("invalid date {rest:?}: {e}")),
      },

      "status" => match rest.parse::<StatusFilter>() {
        Ok(filter) => {
          self.dashboard.calendar.status_filter = filter;
          self.render();
        }
        Err(e) => self.error(e),
      },
      "surveyor" => {
        let rest = if rest.is_empty() { "all" } else { rest };
        self.dashboard.calendar.surveyor_filter = SurveyorFilter::from(rest);
        self.render();
      }
      "clear" => {
        self.dashboard.calendar.clear_filters();
        self.render();
      }

      "unscheduled" => {
        let text = ui::unscheduled(&self.dashboard.unscheduled());
        self.output.push_str(&text);
      }
      "surveyors" => {
        let text = ui::surveyors(&self.dashboard.surveyors());
        self.output.push_str(&text);
      }
      "show" => match self.dashboard.store().get(rest) {
        Some(visit) => {
          let text = ui::visit_detail::render(visit);
          self.output.push_str(&text);
        }
        None => self.error(format!("no visit with id {rest:?}")),
      },

      "confirm" | "decline" | "reschedule" => {
        let action: VisitAction = command.parse()?;
        self.request(rest, action);
      }
      "set" => {
        let Some((id, status)) = rest.split_once(' ') else {
          self.error("usage: set <id> <status>");
          return Ok(true);
        };
        match status.trim().parse::<VisitStatus>() {
          Ok(status) => {
            self.dashboard.on_visit_status_change(id, status);
            self.render();
          }
          Err(e) => self.error(e),
        }
      }

      "banner" => {
        self.dashboard.banner_clicked();
        self.render();
      }
      "dismiss" => {
        if !self.dashboard.dismiss_banner() {
          writeln!(self.output, "No banner to dismiss").ok();
        }
      }

      "save" => match self.dashboard.store().save(&self.data_path) {
        Ok(()) => {
          tracing::info!(path = %self.data_path.display(), "saved visits");
          writeln!(self.output, "Saved to {}", self.data_path.display()).ok();
        }
        Err(e) => self.error(e),
      },

      other => self.error(format!("unknown command {other:?}, try `help`")),
    }

    Ok(true)
  }

  fn navigate(&mut self, direction: Direction) {
    self.dashboard.calendar.navigate(direction);
    self.render();
  }

  /// Show the action's question and wait for `yes`.
  fn request(&mut self, visit_id: &str, action: VisitAction) {
    let Some(visit) = self.dashboard.store().get(visit_id) else {
      self.error(format!("no visit with id {visit_id:?}"));
      return;
    };
    if let Err(e) = action.check(visit.status) {
      self.error(e);
      return;
    }
    let prompt = action.prompt(&ui::visit_detail::slot(visit));
    writeln!(self.output, "{}: {prompt} [y/N]", action.title()).ok();
    self.pending = Some(PendingAction {
      visit_id: visit_id.to_string(),
      action,
    });
  }

  fn apply(&mut self, visit_id: &str, action: VisitAction) {
    match self.dashboard.apply_action(visit_id, action) {
      Ok(_) => {
        writeln!(self.output, "{}", action.success_message()).ok();
        self.render();
      }
      Err(e) => self.error(e),
    }
  }

  fn error(&mut self, message: impl std::fmt::Display) {
    writeln!(self.output, "error: {message}").ok();
  }
}
