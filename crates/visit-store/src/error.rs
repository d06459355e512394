//! Error type for `visit-store`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] visit_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Two records in the loaded file share an id.
  #[error("duplicate visit id: {0}")]
  DuplicateId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
