//! Calendar pane: one block per visible day.

use std::fmt::Write as _;

use visit_calendar::{CalendarState, CalendarView, DayCell, ViewMode, engine::overflow_label};

use super::visit_line;

pub fn render(view: &CalendarView<'_>, state: &CalendarState) -> String {
  let mut out = String::new();

  let filter = if state.is_filtered() {
    format!(
      "  filter: status={} surveyor={}",
      state.status_filter, state.surveyor_filter
    )
  } else {
    String::new()
  };
  writeln!(out, "{}  [{}]{filter}", view.title, view.view_mode.label()).ok();

  for cell in &view.days {
    render_day(&mut out, cell, view.view_mode);
  }
  out
}

fn render_day(out: &mut String, cell: &DayCell<'_>, view_mode: ViewMode) {
  let marker = if cell.is_today { '*' } else { ' ' };
  let label = cell.date.format("%a %d %b");

  // Days a month grid borrows from neighbouring months are bracketed, and
  // stay terse when empty.
  let borrowed = view_mode == ViewMode::Month && !cell.in_reference_month;
  if borrowed {
    writeln!(out, "{marker}({label})").ok();
  } else {
    writeln!(out, "{marker}{label}").ok();
  }
  if cell.visits.is_empty() {
    if !borrowed {
      out.push_str("    No visits\n");
    }
    return;
  }
  for visit in cell.displayed() {
    writeln!(out, "    {}", visit_line(visit)).ok();
  }
  let overflow = cell.overflow_count();
  if overflow > 0 {
    writeln!(out, "    {}  (`day {}` to expand)", overflow_label(overflow), cell.date).ok();
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use visit_core::{Visit, VisitStatus, VisitType};

  use super::*;

  #[test]
  fn month_view_shows_first_visit_and_overflow() {
    let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    let visits: Vec<Visit> = ["10:00", "08:00", "12:00"]
      .iter()
      .enumerate()
      .map(|(i, start)| {
        Visit::new(
          i.to_string(),
          day,
          *start,
          "13:00",
          VisitStatus::Confirmed,
          VisitType::Nbi,
        )
      })
      .collect();
    let state = CalendarState::new(day).with_view_mode(ViewMode::Month);
    let text = render(&state.view(&visits, day), &state);

    assert!(text.starts_with("October 2026  [Month]\n"));
    assert!(text.contains("*Wed 14 Oct\n    08:00 - 13:00"));
    assert!(text.contains("+2 more visits"));
    assert!(!text.contains("10:00 - 13:00"));
    assert!(text.contains("(Sun 27 Sep)"));
  }

  #[test]
  fn borrowed_days_still_show_their_visits() {
    let reference = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    let visits = vec![
      Visit::new("sep", "2026-09-30", "09:00", "10:00", VisitStatus::Confirmed, VisitType::Map),
      Visit::new("sep2", "2026-09-30", "11:00", "12:00", VisitStatus::Confirmed, VisitType::Map),
    ];
    let state = CalendarState::new(reference).with_view_mode(ViewMode::Month);
    let text = render(&state.view(&visits, reference), &state);

    assert!(text.contains(" (Wed 30 Sep)\n    09:00 - 10:00"));
    assert!(text.contains("#sep\n"));
    assert!(!text.contains("#sep2"));
    assert!(text.contains("+1 more visit  (`day 2026-09-30` to expand)"));
    assert!(text.contains(" (Sun 27 Sep)\n (Mon 28 Sep)\n"));
  }
}
