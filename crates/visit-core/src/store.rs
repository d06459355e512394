//! The `VisitStore` trait.
//!
//! The trait is implemented by the host's storage (e.g. `visit-store`). The
//! calendar layer depends on this abstraction and only ever reads through
//! [`VisitStore::visits`]; status changes are the single write path.

use crate::{
  Error, Result,
  status::{VisitAction, VisitStatus},
  visit::Visit,
};

/// The host-owned, mutable list of visits.
///
/// There is exactly one writer. Updates are last-write-wins, keyed by visit
/// id.
pub trait VisitStore {
  /// All visits in host order.
  fn visits(&self) -> &[Visit];

  /// Replace the status of the visit with `visit_id`, returning the previous
  /// status. Returns [`Error::UnknownVisitId`] if no such visit exists.
  fn set_status(
    &mut self,
    visit_id: &str,
    status: VisitStatus,
  ) -> Result<VisitStatus>;

  fn get(&self, visit_id: &str) -> Option<&Visit> {
    self.visits().iter().find(|v| v.id == visit_id)
  }

  /// The status-change callback handed to detail panels.
  ///
  /// An unknown id is a no-op: the panel may hold a stale record after the
  /// host replaced its list.
  fn on_visit_status_change(&mut self, visit_id: &str, status: VisitStatus) {
    match self.set_status(visit_id, status) {
      Ok(previous) => {
        tracing::debug!(visit_id, %previous, %status, "visit status changed");
      }
      Err(Error::UnknownVisitId(_)) => {
        tracing::debug!(visit_id, %status, "ignoring status change for unknown visit");
      }
      Err(e) => {
        tracing::warn!(visit_id, %status, error = %e, "status change failed");
      }
    }
  }

  /// Apply a detail-panel action. Unlike [`Self::on_visit_status_change`],
  /// an unknown id or an unavailable action is reported to the caller.
  fn apply_action(
    &mut self,
    visit_id: &str,
    action: VisitAction,
  ) -> Result<VisitStatus> {
    let current = self
      .get(visit_id)
      .map(|v| v.status)
      .ok_or_else(|| Error::UnknownVisitId(visit_id.to_string()))?;
    let target = action.check(current)?;
    self.set_status(visit_id, target)?;
    Ok(target)
  }

  /// Number of visits whose customer has yet to confirm.
  fn awaiting_confirmation_count(&self) -> usize {
    self
      .visits()
      .iter()
      .filter(|v| v.status == VisitStatus::WaitingForConfirmation)
      .count()
  }
}
