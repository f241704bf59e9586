//! Application state: the read-only catalogue and the assessment history.
//!
//! This module owns:
//!   - the catalogue (built-in or from TOML), shared read-only
//!   - the history store behind an async RwLock
//!
//! All mutation goes through `History`, so every append/delete is flushed to disk
//! before other requests can see it.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::domain::{CategoryGroup, Catalogue};
use crate::history::History;

#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub history: Arc<RwLock<History>>,
}

impl AppState {
    /// Build state from env: load config, pick the catalogue, rehydrate history.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        let catalogue = cfg.catalogue();
        let history = History::open(cfg.history_path());
        Self::from_parts(catalogue, history)
    }

    /// Build state from explicit parts (tests, embedding).
    pub fn from_parts(catalogue: Catalogue, history: History) -> Self {
        // Inventory summary by group.
        for group in CategoryGroup::ALL {
            let categories = catalogue.categories_in(group).count();
            info!(target: "wippf_backend", ?group, categories, "Startup taxonomy inventory");
        }
        info!(
            target: "wippf_backend",
            questions = catalogue.questions.len(),
            scales = catalogue.scales.len(),
            history = history.len(),
            history_path = ?history.path(),
            "Catalogue and history ready"
        );

        Self {
            catalogue: Arc::new(catalogue),
            history: Arc::new(RwLock::new(history)),
        }
    }

    /// In-memory state with the given config's catalogue; nothing is persisted.
    pub fn ephemeral(cfg: &AppConfig) -> Self {
        Self::from_parts(cfg.catalogue(), History::in_memory())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
