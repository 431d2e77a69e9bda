//! File-backed JSON persistence for the current session, lifetime progress
//! and saved settings. One file per record under the data directory.
//!
//! Failures never reach callers: loads yield `None`, writes are logged.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::domain::{ProgressData, ScoreData, SessionData, Settings};

const SESSION_FILE: &str = "emhoctoan_session.json";
const PROGRESS_FILE: &str = "emhoctoan_progress.json";
const SETTINGS_FILE: &str = "emhoctoan_settings.json";

#[derive(Clone, Debug)]
pub struct Storage {
  dir: PathBuf,
}

impl Storage {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    let dir = dir.into();
    if let Err(e) = fs::create_dir_all(&dir) {
      error!(target: "storage", dir = %dir.display(), error = %e, "Failed to create data directory");
    }
    Self { dir }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn read<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
    let path = self.dir.join(file);
    let raw = match fs::read_to_string(&path) {
      Ok(s) => s,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
      Err(e) => {
        error!(target: "storage", path = %path.display(), error = %e, "Failed to read record");
        return None;
      }
    };
    match serde_json::from_str(&raw) {
      Ok(v) => Some(v),
      Err(e) => {
        warn!(target: "storage", path = %path.display(), error = %e, "Ignoring unreadable record");
        None
      }
    }
  }

  fn write<T: Serialize>(&self, file: &str, value: &T) {
    let path = self.dir.join(file);
    let json = match serde_json::to_string(value) {
      Ok(j) => j,
      Err(e) => {
        error!(target: "storage", path = %path.display(), error = %e, "Failed to serialize record");
        return;
      }
    };
    match fs::write(&path, json) {
      Ok(()) => debug!(target: "storage", path = %path.display(), "Record saved"),
      Err(e) => error!(target: "storage", path = %path.display(), error = %e, "Failed to save record"),
    }
  }

  fn remove(&self, file: &str) {
    let path = self.dir.join(file);
    match fs::remove_file(&path) {
      Ok(()) => debug!(target: "storage", path = %path.display(), "Record cleared"),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => error!(target: "storage", path = %path.display(), error = %e, "Failed to clear record"),
    }
  }

  pub fn save_session(&self, session: &SessionData) {
    self.write(SESSION_FILE, session);
  }

  pub fn load_session(&self) -> Option<SessionData> {
    self.read(SESSION_FILE)
  }

  pub fn clear_session(&self) {
    self.remove(SESSION_FILE);
  }

  pub fn save_progress(&self, progress: &ProgressData) {
    self.write(PROGRESS_FILE, progress);
  }

  pub fn load_progress(&self) -> Option<ProgressData> {
    self.read(PROGRESS_FILE)
  }

  /// Folds one finished session into lifetime progress and saves it.
  pub fn update_progress(&self, score: &ScoreData, student_name: &str) -> ProgressData {
    let previous = self.load_progress().unwrap_or_else(empty_progress);
    let total_problems = previous.total_problems + score.total;
    let total_correct = previous.total_correct + score.correct;
    let progress = ProgressData {
      total_sessions: previous.total_sessions + 1,
      total_problems,
      total_correct,
      best_streak: previous.best_streak.max(score.best_streak),
      average_score: if total_problems == 0 { 0.0 } else { total_correct as f64 / total_problems as f64 },
      last_played: Utc::now().to_rfc3339(),
      student_name: if student_name.is_empty() { previous.student_name } else { student_name.to_string() },
    };
    self.save_progress(&progress);
    progress
  }

  pub fn save_settings(&self, settings: &Settings) {
    self.write(SETTINGS_FILE, settings);
  }

  pub fn load_settings(&self) -> Option<Settings> {
    self.read(SETTINGS_FILE)
  }
}

fn empty_progress() -> ProgressData {
  ProgressData {
    total_sessions: 0,
    total_problems: 0,
    total_correct: 0,
    best_streak: 0,
    average_score: 0.0,
    last_played: Utc::now().to_rfc3339(),
    student_name: String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, ProblemType};
  use tempfile::TempDir;

  fn store() -> (TempDir, Storage) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("data"));
    (dir, storage)
  }

  #[test]
  fn missing_records_load_as_none() {
    let (_dir, s) = store();
    assert!(s.load_session().is_none());
    assert!(s.load_progress().is_none());
    assert!(s.load_settings().is_none());
    s.clear_session();
  }

  #[test]
  fn settings_round_trip_through_disk() {
    let (_dir, s) = store();
    let settings = Settings {
      enabled_types: vec![ProblemType::ReviewSemester1],
      difficulty: Difficulty::Hard,
      question_quantity: 30,
      student_name: "Lan".into(),
    };
    s.save_settings(&settings);
    assert_eq!(s.load_settings(), Some(settings));
    assert!(s.dir().join(SETTINGS_FILE).exists());
  }

  #[test]
  fn session_can_be_cleared() {
    let (_dir, s) = store();
    let session = SessionData {
      current_score: ScoreData::default(),
      problems: vec![],
      current_problem_index: 0,
      settings: Settings::default(),
      start_time: 5,
      is_completed: false,
      total_marks: 0,
    };
    s.save_session(&session);
    assert_eq!(s.load_session(), Some(session));
    s.clear_session();
    assert!(s.load_session().is_none());
  }

  #[test]
  fn corrupt_file_is_ignored() {
    let (_dir, s) = store();
    fs::write(s.dir().join(PROGRESS_FILE), "{not json").unwrap();
    assert!(s.load_progress().is_none());
  }

  #[test]
  fn progress_accumulates_across_sessions() {
    let (_dir, s) = store();
    let first = s.update_progress(&ScoreData { correct: 8, total: 10, streak: 2, best_streak: 5 }, "An");
    assert_eq!(first.total_sessions, 1);
    assert!((first.average_score - 0.8).abs() < 1e-9);

    let second = s.update_progress(&ScoreData { correct: 2, total: 10, streak: 0, best_streak: 1 }, "");
    assert_eq!(second.total_sessions, 2);
    assert_eq!(second.total_problems, 20);
    assert_eq!(second.total_correct, 10);
    assert_eq!(second.best_streak, 5);
    assert!((second.average_score - 0.5).abs() < 1e-9);
    assert_eq!(second.student_name, "An");
    assert!(chrono::DateTime::parse_from_rfc3339(&second.last_played).is_ok());
    assert_eq!(s.load_progress(), Some(second));
  }
}
