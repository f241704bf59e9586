//! Loading backend configuration (storage + optional catalogue override) from TOML.
//!
//! See `AppConfig` for the expected schema. Every section is optional; an empty
//! catalogue section keeps the built-in one.
//!
//! ```toml
//! [storage]
//! history_path = "data/wippf_history.json"
//!
//! [[questions]]
//! id = 1
//! category_code = "1a"
//! text = "I am on time for appointments."
//!
//! [[categories]]
//! id = "1"
//! name = "Punctuality"
//! group = "secondary"
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Catalogue, CategoryDefinition, Question, Scale};
use crate::error::Result;
use crate::seeds::{seed_categories, seed_questions, seed_scales};

pub const DEFAULT_HISTORY_PATH: &str = "wippf_history.json";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub storage: StorageCfg,
  #[serde(default)]
  pub questions: Vec<Question>,
  #[serde(default)]
  pub categories: Vec<CategoryDefinition>,
  #[serde(default)]
  pub scales: Vec<Scale>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct StorageCfg {
  #[serde(default)] pub history_path: Option<PathBuf>,
}

impl AppConfig {
  pub fn from_toml(text: &str) -> Result<Self> {
    Ok(toml::from_str(text)?)
  }

  /// Built-in catalogue with any non-empty configured section swapped in.
  pub fn catalogue(&self) -> Catalogue {
    fn pick<T: Clone>(configured: &[T], builtin: fn() -> Vec<T>) -> Vec<T> {
      if configured.is_empty() { builtin() } else { configured.to_vec() }
    }
    Catalogue {
      questions: pick(&self.questions, seed_questions),
      categories: pick(&self.categories, seed_categories),
      scales: pick(&self.scales, seed_scales),
    }
  }

  /// HISTORY_PATH wins over the config file, which wins over the default.
  pub fn history_path(&self) -> PathBuf {
    self.history_path_with(std::env::var_os("HISTORY_PATH").map(PathBuf::from))
  }

  fn history_path_with(&self, env_override: Option<PathBuf>) -> PathBuf {
    env_override
      .or_else(|| self.storage.history_path.clone())
      .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH))
  }
}

/// Attempt to load `AppConfig` from WIPPF_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("WIPPF_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match AppConfig::from_toml(&s) {
      Ok(cfg) => {
        info!(target: "wippf_backend", %path, questions = cfg.questions.len(), categories = cfg.categories.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "wippf_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "wippf_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
