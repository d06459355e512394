//! The "visits awaiting confirmation" banner.
//!
//! [`Banner`] is the state machine:
//!
//! ```text
//! visible-active ──(D - 1s)──▶ visible-fading ──(D)──▶ hidden
//!        │                            │
//!        └────────── dismiss ─────────┴──────────────▶ hidden
//! ```
//!
//! Each activation cycle owes exactly one [`Dismissal`], delivered either on
//! expiry or on manual dismiss. [`BannerTimer`] drives a banner with two
//! one-shot Tokio timers and reports [`BannerEvent`]s over a channel.

use std::{
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use tokio::{
  sync::mpsc,
  task::JoinHandle,
  time::{Instant, sleep_until},
};

/// How long before expiry the banner starts fading out.
pub const FADE_LEAD: Duration = Duration::from_secs(1);

// ─── State machine ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
  VisibleActive,
  /// Still visible and dismissible; only the opacity changes.
  VisibleFading,
  Hidden,
}

/// Why a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
  Expired,
  Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEvent {
  Fading,
  Dismissed(Dismissal),
}

/// One activation cycle of the banner, driven by elapsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
  count:    usize,
  duration: Duration,
  phase:    BannerState,
  /// Whether this cycle still owes its dismissal.
  pending:  bool,
}

impl Banner {
  /// Start a cycle. With `count == 0` nothing is shown and nothing is owed.
  pub fn armed(count: usize, duration: Duration) -> Self {
    let active = count > 0;
    Self {
      count,
      duration,
      phase: if active { BannerState::VisibleActive } else { BannerState::Hidden },
      pending: active,
    }
  }

  /// Elapsed time at which the banner starts fading.
  pub fn fade_at(&self) -> Duration { self.duration.saturating_sub(FADE_LEAD) }

  pub fn duration(&self) -> Duration { self.duration }

  /// Apply the transitions due at `elapsed` since the cycle started.
  pub fn advance(&mut self, elapsed: Duration) -> Option<BannerEvent> {
    if !self.pending {
      return None;
    }
    if elapsed >= self.duration {
      self.phase = BannerState::Hidden;
      self.pending = false;
      return Some(BannerEvent::Dismissed(Dismissal::Expired));
    }
    if elapsed >= self.fade_at() && self.phase == BannerState::VisibleActive {
      self.phase = BannerState::VisibleFading;
      return Some(BannerEvent::Fading);
    }
    None
  }

  /// Hide immediately. Returns `None` if the cycle already ended.
  pub fn dismiss(&mut self) -> Option<BannerEvent> {
    if !self.pending {
      return None;
    }
    self.phase = BannerState::Hidden;
    self.pending = false;
    Some(BannerEvent::Dismissed(Dismissal::Manual))
  }

  /// End the cycle without a dismissal; used when a cycle is replaced.
  fn retire(&mut self) {
    self.phase = BannerState::Hidden;
    self.pending = false;
  }

  /// Update the awaiting-confirmation count shown in the message.
  pub fn set_count(&mut self, count: usize) { self.count = count; }

  pub fn count(&self) -> usize { self.count }

  pub fn is_pending(&self) -> bool { self.pending }

  /// The visible state. A zero count always reads as hidden.
  pub fn state(&self) -> BannerState {
    if self.count == 0 { BannerState::Hidden } else { self.phase }
  }

  pub fn message(&self) -> String {
    let noun = if self.count == 1 { "visit" } else { "visits" };
    format!("You have {} {noun} awaiting confirmation", self.count)
  }
}

// ─── Timer driver ────────────────────────────────────────────────────────────

fn lock(banner: &Mutex<Banner>) -> MutexGuard<'_, Banner> {
  banner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The fade and hide timers of one cycle. Dropping the handle aborts both.
struct CycleTimers {
  fade: JoinHandle<()>,
  hide: JoinHandle<()>,
}

impl Drop for CycleTimers {
  fn drop(&mut self) {
    self.fade.abort();
    self.hide.abort();
  }
}

/// Drives a [`Banner`] in real time on the Tokio runtime.
///
/// Methods that arm a cycle must be called from within a runtime.
pub struct BannerTimer {
  duration: Duration,
  banner:   Arc<Mutex<Banner>>,
  events:   mpsc::UnboundedSender<BannerEvent>,
  timers:   Option<CycleTimers>,
}

impl BannerTimer {
  /// An idle timer (hidden, nothing owed) and the receiver for its events.
  pub fn new(duration: Duration) -> (Self, mpsc::UnboundedReceiver<BannerEvent>) {
    let (events, rx) = mpsc::unbounded_channel();
    let timer = Self {
      duration,
      banner: Arc::new(Mutex::new(Banner::armed(0, duration))),
      events,
      timers: None,
    };
    (timer, rx)
  }

  /// Start a fresh cycle for `count` awaiting visits, cancelling any
  /// previous one without signalling it.
  pub fn arm(&mut self, count: usize) {
    self.timers = None;
    lock(&self.banner).retire();

    let banner = Banner::armed(count, self.duration);
    let fade_at = banner.fade_at();
    let pending = banner.is_pending();
    // A fresh cell per cycle: a timer task from an aborted cycle can only
    // ever touch its own, retired banner.
    self.banner = Arc::new(Mutex::new(banner));

    if !pending {
      tracing::debug!("banner suppressed: nothing awaiting confirmation");
      return;
    }

    tracing::debug!(count, duration = ?self.duration, "banner armed");
    let started = Instant::now();
    self.timers = Some(CycleTimers {
      fade: self.spawn_step(started, fade_at),
      hide: self.spawn_step(started, self.duration),
    });
  }

  fn spawn_step(&self, started: Instant, at: Duration) -> JoinHandle<()> {
    let banner = Arc::clone(&self.banner);
    let events = self.events.clone();
    tokio::spawn(async move {
      // A deadline past the clock's range never fires; only a manual
      // dismiss ends that cycle.
      let Some(deadline) = started.checked_add(at) else { return };
      sleep_until(deadline).await;
      let event = lock(&banner).advance(at);
      if let Some(event) = event {
        tracing::debug!(?event, "banner timer fired");
        events.send(event).ok();
      }
    })
  }

  /// Manual dismiss. Returns `false` if the cycle had already ended.
  pub fn dismiss(&mut self) -> bool {
    let event = lock(&self.banner).dismiss();
    self.timers = None;
    match event {
      Some(event) => {
        tracing::debug!("banner dismissed by user");
        self.events.send(event).ok();
        true
      }
      None => false,
    }
  }

  /// Update the count without restarting the cycle. A zero count hides the
  /// banner; the cycle still ends with its single dismissal.
  pub fn set_count(&self, count: usize) { lock(&self.banner).set_count(count); }

  pub fn state(&self) -> BannerState { lock(&self.banner).state() }

  pub fn is_pending(&self) -> bool { lock(&self.banner).is_pending() }

  /// A copy of the current cycle's banner, for rendering.
  pub fn snapshot(&self) -> Banner { lock(&self.banner).clone() }
}

impl Drop for BannerTimer {
  fn drop(&mut self) {
    self.timers = None;
    lock(&self.banner).retire();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const D: Duration = Duration::from_millis(15_000);

  fn ms(n: u64) -> Duration { Duration::from_millis(n) }

  #[test]
  fn zero_count_arms_nothing() {
    let mut b = Banner::armed(0, D);
    assert_eq!(b.state(), BannerState::Hidden);
    assert!(!b.is_pending());
    assert_eq!(b.advance(D), None);
    assert_eq!(b.dismiss(), None);
  }

  #[test]
  fn fades_then_expires_exactly_once() {
    let mut b = Banner::armed(3, D);
    assert_eq!(b.state(), BannerState::VisibleActive);
    assert_eq!(b.advance(ms(13_999)), None);
    assert_eq!(b.advance(ms(14_000)), Some(BannerEvent::Fading));
    assert_eq!(b.state(), BannerState::VisibleFading);
    assert_eq!(b.advance(ms(14_500)), None);
    assert_eq!(
      b.advance(ms(15_000)),
      Some(BannerEvent::Dismissed(Dismissal::Expired))
    );
    assert_eq!(b.state(), BannerState::Hidden);
    assert_eq!(b.advance(ms(16_000)), None);
    assert_eq!(b.dismiss(), None);
  }

  #[test]
  fn manual_dismiss_wins_over_expiry() {
    let mut b = Banner::armed(1, D);
    assert_eq!(b.dismiss(), Some(BannerEvent::Dismissed(Dismissal::Manual)));
    assert_eq!(b.state(), BannerState::Hidden);
    assert_eq!(b.advance(D), None);
    assert_eq!(b.dismiss(), None);
  }

  #[test]
  fn dismiss_while_fading_is_allowed() {
    let mut b = Banner::armed(2, D);
    b.advance(ms(14_200));
    assert_eq!(b.state(), BannerState::VisibleFading);
    assert_eq!(b.dismiss(), Some(BannerEvent::Dismissed(Dismissal::Manual)));
  }

  #[test]
  fn zero_count_suppresses_but_still_owes_dismissal() {
    let mut b = Banner::armed(2, D);
    b.set_count(0);
    assert_eq!(b.state(), BannerState::Hidden);
    assert!(b.is_pending());
    assert_eq!(
      b.advance(D),
      Some(BannerEvent::Dismissed(Dismissal::Expired))
    );
  }

  #[test]
  fn short_duration_fades_immediately() {
    let mut b = Banner::armed(1, ms(500));
    assert_eq!(b.fade_at(), Duration::ZERO);
    assert_eq!(b.advance(Duration::ZERO), Some(BannerEvent::Fading));
  }

  #[test]
  fn message_pluralises() {
    assert_eq!(
      Banner::armed(1, D).message(),
      "You have 1 visit awaiting confirmation"
    );
    assert_eq!(
      Banner::armed(3, D).message(),
      "You have 3 visits awaiting confirmation"
    );
  }
}
