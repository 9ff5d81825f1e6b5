//! Application state: the immutable Item Store behind the question synthesizer.
//!
//! Built once at startup and shared read-only across requests; there is no
//! lock because nothing is written after load. Randomness is created per
//! request (see `logic::request_question`), so no RNG is shared either.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::builders::Synthesizer;
use crate::config::{load_config_from_env, EngineConfig};
use crate::store::ItemStore;

#[derive(Clone)]
pub struct AppState {
    pub synth: Synthesizer,
}

impl AppState {
    /// Build state from env: load config, then every category collection.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env();
        let store = ItemStore::load_all(cfg.sources());
        Self::from_store(store, &cfg)
    }

    /// Build state around an already loaded store.
    pub fn from_store(store: ItemStore, cfg: &EngineConfig) -> Self {
        let total: usize = store.inventory().iter().map(|(_, n)| n).sum();
        info!(target: "repaso_backend", total_records = total, "Item store ready");
        Self {
            synth: Synthesizer::new(Arc::new(store), cfg.option_count, cfg.max_attempts),
        }
    }
}
