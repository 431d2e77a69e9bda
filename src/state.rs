//! Application state: configuration, persistence and the single active test.
//!
//! This is a single-student app, so there is at most one session. It is
//! written through to storage after every mutation and restored on startup.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::{load_config_from_env, AppConfig};
use crate::domain::{SessionData, Settings};
use crate::generator::BatchLimits;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: Storage,
    pub session: Arc<RwLock<Option<SessionData>>>,
}

impl AppState {
    /// Build state from env: load config, open the data directory, restore
    /// an unfinished session.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        Self::new(load_config_from_env())
    }

    pub fn new(config: AppConfig) -> Self {
        let storage = Storage::new(&config.storage.data_dir);
        info!(
            target: "emhoctoan_backend",
            data_dir = %storage.dir().display(),
            max_batch_attempts = config.engine.max_batch_attempts,
            "Storage ready"
        );

        let restored = match storage.load_session() {
            Some(s) if s.is_completed => {
                info!(target: "session", "Dropping finished session from previous run");
                storage.clear_session();
                None
            }
            Some(s) if s.settings.enabled_types.is_empty() || s.problems.is_empty() => {
                warn!(target: "session", "Dropping empty session from previous run");
                storage.clear_session();
                None
            }
            Some(s) => {
                info!(
                    target: "session",
                    problems = s.problems.len(),
                    answered = s.current_score.total,
                    "Restored unfinished session"
                );
                Some(s)
            }
            None => None,
        };

        Self {
            config,
            storage,
            session: Arc::new(RwLock::new(restored)),
        }
    }

    pub fn limits(&self) -> BatchLimits {
        self.config.engine.limits()
    }

    /// Saved settings, else the configured defaults.
    pub fn settings(&self) -> Settings {
        self.storage
            .load_settings()
            .unwrap_or_else(|| self.config.defaults.clone())
    }

    /// Writes the session record through to storage (or clears it).
    pub fn persist(&self, session: Option<&SessionData>) {
        match session {
            Some(s) => self.storage.save_session(s),
            None => self.storage.clear_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::domain::ScoreData;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AppConfig {
        AppConfig {
            storage: StorageConfig { data_dir: dir.path().to_string_lossy().into_owned() },
            ..AppConfig::default()
        }
    }

    fn session(completed: bool) -> SessionData {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(9);
        let mut s = crate::session::start(&mut rng, Settings::default(), &BatchLimits::default(), 0).unwrap();
        s.is_completed = completed;
        s
    }

    #[tokio::test]
    async fn unfinished_session_is_restored() {
        let dir = TempDir::new().unwrap();
        Storage::new(dir.path()).save_session(&session(false));
        let state = AppState::new(config(&dir));
        let restored = state.session.read().await.clone().unwrap();
        assert_eq!(restored.problems.len(), 25);
        assert_eq!(restored.current_score, ScoreData::default());
    }

    #[tokio::test]
    async fn finished_session_is_dropped() {
        let dir = TempDir::new().unwrap();
        Storage::new(dir.path()).save_session(&session(true));
        let state = AppState::new(config(&dir));
        assert!(state.session.read().await.is_none());
        assert!(state.storage.load_session().is_none());
    }

    #[test]
    fn settings_fall_back_to_config_defaults() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(config(&dir));
        assert_eq!(state.settings(), Settings::default());

        let mine = Settings { question_quantity: 10, ..Settings::default() };
        state.storage.save_settings(&mine);
        assert_eq!(state.settings(), mine);
    }
}
