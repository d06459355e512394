//! [`MemoryStore`]: the in-memory implementation of [`VisitStore`].

use std::{collections::HashSet, fs, path::Path};

use visit_core::{Visit, VisitStatus, VisitStore};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A visit list held in memory, in host order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  visits: Vec<Visit>,
}

impl MemoryStore {
  /// Wrap an existing list. Fails if two visits share an id.
  pub fn new(visits: Vec<Visit>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(visits.len());
    for visit in &visits {
      if !seen.insert(visit.id.as_str()) {
        return Err(Error::DuplicateId(visit.id.clone()));
      }
    }
    Ok(Self { visits })
  }

  /// Parse a JSON array of visits.
  pub fn from_json(json: &str) -> Result<Self> {
    let visits: Vec<Visit> = serde_json::from_str(json)?;
    Self::new(visits)
  }

  /// Load the visit list from a JSON file.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let store = Self::from_json(&raw)?;
    tracing::debug!(path = %path.display(), visits = store.visits.len(), "loaded visits");
    Ok(store)
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&self.visits)?)
  }

  /// Write the visit list back to `path` as pretty-printed JSON.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = self.to_json()?;
    fs::write(path, json).map_err(|source| Error::Write {
      path: path.to_path_buf(),
      source,
    })?;
    tracing::debug!(path = %path.display(), visits = self.visits.len(), "saved visits");
    Ok(())
  }

  pub fn len(&self) -> usize { self.visits.len() }

  pub fn is_empty(&self) -> bool { self.visits.is_empty() }

  pub fn into_visits(self) -> Vec<Visit> { self.visits }
}

impl VisitStore for MemoryStore {
  fn visits(&self) -> &[Visit] { &self.visits }

  fn set_status(
    &mut self,
    visit_id: &str,
    status: VisitStatus,
  ) -> visit_core::Result<VisitStatus> {
    let visit = self
      .visits
      .iter_mut()
      .find(|v| v.id == visit_id)
      .ok_or_else(|| visit_core::Error::UnknownVisitId(visit_id.to_string()))?;
    Ok(std::mem::replace(&mut visit.status, status))
  }
}
