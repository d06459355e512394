//! Host configuration, layered from defaults, a TOML file and `VISITS_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use visit_calendar::ViewMode;

/// Runtime settings, deserialised from `visits.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// JSON file holding the visit list.
  pub data_path:          PathBuf,
  pub banner_duration_ms: u64,
  pub default_view:       ViewMode,
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("data_path", "visits.json")?
      .set_default("banner_duration_ms", 15_000_i64)?
      .set_default("default_view", ViewMode::default().to_string())?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("VISITS"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let settings = Settings::load(Path::new("/nonexistent/visits.toml")).unwrap();
    assert_eq!(settings.banner_duration_ms, 15_000);
    assert_eq!(settings.default_view, ViewMode::WorkingWeek);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir()
      .join(format!("visits-settings-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "data_path = \"fixtures/october.json\"\ndefault_view = \"month\"\n",
    )
    .unwrap();
    let settings = Settings::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.data_path, PathBuf::from("fixtures/october.json"));
    assert_eq!(settings.default_view, ViewMode::Month);
    assert_eq!(settings.banner_duration_ms, 15_000);
  }
}
