//! Loading engine configuration from TOML.
//!
//! Example:
//! ```toml
//! data_dir = "data"
//! option_count = 4
//! max_attempts = 100
//!
//! [files]
//! vocabulary = "vocab.json"
//! context_vocab = "context.json"
//! ```
//! Every key is optional. DATA_DIR overrides `data_dir`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Category;

pub const DEFAULT_OPTION_COUNT: usize = 4;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;
const MIN_OPTION_COUNT: usize = 2;
const MAX_OPTION_COUNT: usize = 5;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  pub data_dir: PathBuf,
  /// Options per vocabulary question (cloze categories use their own pool size).
  pub option_count: usize,
  /// Record picks per request before giving up on a category.
  pub max_attempts: usize,
  /// Per-category file name overrides, relative to `data_dir`.
  pub files: HashMap<Category, String>,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      data_dir: PathBuf::from("data"),
      option_count: DEFAULT_OPTION_COUNT,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
      files: HashMap::new(),
    }
  }
}

impl EngineConfig {
  /// Parse a TOML document and clamp numeric settings into their valid ranges.
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str::<EngineConfig>(s).map(EngineConfig::sanitized)
  }

  fn sanitized(mut self) -> Self {
    let clamped = self.option_count.clamp(MIN_OPTION_COUNT, MAX_OPTION_COUNT);
    if clamped != self.option_count {
      warn!(target: "repaso_backend", requested = self.option_count, used = clamped, "option_count out of range; clamped");
      self.option_count = clamped;
    }
    if self.max_attempts == 0 {
      warn!(target: "repaso_backend", "max_attempts must be at least 1; using 1");
      self.max_attempts = 1;
    }
    self
  }

  /// Path of the JSON collection for `category`.
  pub fn source_for(&self, category: Category) -> PathBuf {
    let name = self
      .files
      .get(&category)
      .map(String::as_str)
      .unwrap_or_else(|| category.default_file_name());
    self.data_dir.join(name)
  }

  /// (category, path) for every category, ready for `ItemStore::load_all`.
  pub fn sources(&self) -> Vec<(Category, PathBuf)> {
    Category::ALL.iter().map(|c| (*c, self.source_for(*c))).collect()
  }
}

/// Load config from REPASO_CONFIG_PATH (if set) and apply DATA_DIR.
/// Any read/parse error is logged and defaults are used.
pub fn load_config_from_env() -> EngineConfig {
  let mut cfg = match std::env::var("REPASO_CONFIG_PATH") {
    Ok(path) => load_config_file(Path::new(&path)).unwrap_or_default(),
    Err(_) => EngineConfig::default(),
  };
  if let Ok(dir) = std::env::var("DATA_DIR") {
    if !dir.trim().is_empty() {
      cfg.data_dir = PathBuf::from(dir);
    }
  }
  info!(
    target: "repaso_backend",
    data_dir = %cfg.data_dir.display(),
    option_count = cfg.option_count,
    max_attempts = cfg.max_attempts,
    "Engine configuration"
  );
  cfg
}

fn load_config_file(path: &Path) -> Option<EngineConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match EngineConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "repaso_backend", path = %path.display(), "Loaded engine config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "repaso_backend", path = %path.display(), error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "repaso_backend", path = %path.display(), error = %e, "Failed to read TOML config file");
      None
    }
  }
}
