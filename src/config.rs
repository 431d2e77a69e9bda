//! Loading application configuration from TOML.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [engine]
//! max_batch_attempts = 10000
//!
//! [storage]
//! data_dir = "./data"
//!
//! [defaults]
//! enabledTypes = ["addition", "subtraction"]
//! difficulty = "medium"
//! questionQuantity = 25
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Settings;
use crate::generator::BatchLimits;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub engine: EngineConfig,
  #[serde(default)]
  pub storage: StorageConfig,
  /// Settings used until the student saves their own.
  #[serde(default)]
  pub defaults: Settings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
  #[serde(default = "default_max_batch_attempts")]
  pub max_batch_attempts: usize,
}

fn default_max_batch_attempts() -> usize {
  BatchLimits::default().max_batch_attempts
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self { max_batch_attempts: default_max_batch_attempts() }
  }
}

impl EngineConfig {
  pub fn limits(&self) -> BatchLimits {
    BatchLimits { max_batch_attempts: self.max_batch_attempts }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

fn default_data_dir() -> String {
  "./data".into()
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self { data_dir: default_data_dir() }
  }
}

pub fn parse_config(raw: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(raw)
}

/// Reads `EMHOCTOAN_CONFIG_PATH` (if set) and applies `EMHOCTOAN_DATA_DIR`.
/// Read or parse failures are logged and defaults used.
pub fn load_config_from_env() -> AppConfig {
  let mut cfg = match std::env::var("EMHOCTOAN_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match parse_config(&s) {
        Ok(cfg) => {
          info!(target: "emhoctoan_backend", %path, "Loaded config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "emhoctoan_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          AppConfig::default()
        }
      },
      Err(e) => {
        error!(target: "emhoctoan_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
        AppConfig::default()
      }
    },
    Err(_) => AppConfig::default(),
  };

  if let Ok(dir) = std::env::var("EMHOCTOAN_DATA_DIR") {
    if !dir.trim().is_empty() {
      cfg.storage.data_dir = dir;
    }
  }
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, ProblemType};

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg.engine.max_batch_attempts, 10_000);
    assert_eq!(cfg.storage.data_dir, "./data");
    assert_eq!(cfg.defaults, Settings::default());
  }

  #[test]
  fn sections_override_independently() {
    let cfg = parse_config(
      r#"
        [engine]
        max_batch_attempts = 250

        [defaults]
        enabledTypes = ["review_semester_1"]
        difficulty = "hard"
        questionQuantity = 18
      "#,
    )
    .unwrap();
    assert_eq!(cfg.engine.limits(), BatchLimits { max_batch_attempts: 250 });
    assert_eq!(cfg.storage.data_dir, "./data");
    assert_eq!(cfg.defaults.enabled_types, vec![ProblemType::ReviewSemester1]);
    assert_eq!(cfg.defaults.difficulty, Difficulty::Hard);
    assert_eq!(cfg.defaults.question_quantity, 18);
  }

  #[test]
  fn unknown_problem_type_is_a_parse_error() {
    assert!(parse_config("[defaults]\nenabledTypes = [\"algebra\"]\nquestionQuantity = 3\n").is_err());
  }
}
