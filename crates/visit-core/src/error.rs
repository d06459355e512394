//! Error types for `visit-core`.

use thiserror::Error;

use crate::status::{VisitAction, VisitStatus};

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid visit date: {0:?}")]
  InvalidDate(String),

  #[error("unknown visit id: {0}")]
  UnknownVisitId(String),

  #[error("unknown visit status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown visit action: {0:?}")]
  UnknownAction(String),

  #[error("unknown view mode: {0:?}")]
  UnknownViewMode(String),

  #[error("cannot {action} a visit that is {status}")]
  ActionUnavailable {
    action: VisitAction,
    status: VisitStatus,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
