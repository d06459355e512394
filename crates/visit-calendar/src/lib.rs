//! Calendar view, filtering and notification logic for the visit dashboard.
//!
//! Everything in [`engine`] is a pure function of its inputs: the caller owns
//! the visit list and the [`CalendarState`] and recomputes on every change.
//! [`banner`] holds the timed "awaiting confirmation" notice, and
//! [`dashboard`] wires a store, a calendar and a banner together for hosts.

pub mod banner;
pub mod dashboard;
pub mod engine;
pub mod filter;
pub mod state;
pub mod view;

pub use banner::{Banner, BannerEvent, BannerState, BannerTimer, Dismissal};
pub use dashboard::Dashboard;
pub use engine::{CalendarView, Collapsed, DayCell};
pub use filter::{StatusFilter, SurveyorFilter};
pub use state::CalendarState;
pub use view::{Direction, ViewMode};
