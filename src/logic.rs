//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Stateless generation (single problem, random pick, unique batch)
//!   - The active test session: start, answer, navigate, finish, retake, reset
//!   - Settings and progress access
//!
//! Session mutations hold the write lock for the whole operation and persist
//! the result before releasing it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::domain::{Difficulty, ProblemType, ProgressData, Settings};
use crate::generator::{self, EngineError};
use crate::protocol::{to_out, to_session_out, ProblemOut, SessionOut};
use crate::scoring::{ResultsSummary, Submission};
use crate::session::{self, AnswerOutcome, SessionError};
use crate::state::AppState;
use crate::util::now_millis;

fn fresh_rng() -> StdRng {
  StdRng::from_entropy()
}

#[instrument(level = "info", skip_all, fields(kind = kind.as_str(), difficulty = difficulty.as_str()))]
pub fn generate_one(kind: ProblemType, difficulty: Difficulty) -> ProblemOut {
  let p = generator::generate_problem(&mut fresh_rng(), kind, difficulty);
  to_out(&p)
}

#[instrument(level = "info", skip_all, fields(enabled = enabled.len(), difficulty = difficulty.as_str()))]
pub fn generate_random(enabled: &[ProblemType], difficulty: Difficulty) -> Result<ProblemOut, EngineError> {
  let p = generator::generate_random_problem(&mut fresh_rng(), enabled, difficulty)?;
  Ok(to_out(&p))
}

#[instrument(level = "info", skip_all, fields(enabled = enabled.len(), quantity, difficulty = difficulty.as_str()))]
pub fn generate_unique(
  state: &AppState,
  enabled: &[ProblemType],
  quantity: usize,
  difficulty: Difficulty,
) -> Result<Vec<ProblemOut>, EngineError> {
  let problems = generator::generate_unique_problems(&mut fresh_rng(), enabled, quantity, difficulty, &state.limits())?;
  Ok(problems.iter().map(to_out).collect())
}

pub async fn current_session(state: &AppState) -> SessionOut {
  let guard = state.session.read().await;
  to_session_out(guard.as_ref())
}

/// Starts a test, replacing any previous one. Explicit settings are saved as
/// the student's new defaults once the test has started.
#[instrument(level = "info", skip_all, fields(explicit = settings.is_some()))]
pub async fn start_test(state: &AppState, settings: Option<Settings>) -> Result<SessionOut, SessionError> {
  let explicit = settings.is_some();
  let settings = settings.unwrap_or_else(|| state.settings());
  let fresh = session::start(&mut fresh_rng(), settings, &state.limits(), now_millis())?;
  if explicit {
    state.storage.save_settings(&fresh.settings);
  }

  let mut guard = state.session.write().await;
  if guard.as_ref().is_some_and(|s| !s.is_completed) {
    warn!(target: "session", "Replacing an unfinished session");
  }
  state.persist(Some(&fresh));
  *guard = Some(fresh);
  Ok(to_session_out(guard.as_ref()))
}

#[instrument(level = "info", skip_all, fields(%problem_id))]
pub async fn submit_answer(state: &AppState, problem_id: &str, submission: &Submission) -> Result<AnswerOutcome, SessionError> {
  let mut guard = state.session.write().await;
  let active = guard.as_mut().ok_or(SessionError::NoActiveSession)?;
  let outcome = session::answer(active, problem_id, submission)?;
  state.persist(Some(&*active));
  Ok(outcome)
}

pub async fn navigate(state: &AppState, index: usize) -> Result<SessionOut, SessionError> {
  let mut guard = state.session.write().await;
  let active = guard.as_mut().ok_or(SessionError::NoActiveSession)?;
  session::navigate(active, index)?;
  state.persist(Some(&*active));
  Ok(to_session_out(guard.as_ref()))
}

/// Finishes the test and folds its score into lifetime progress.
#[instrument(level = "info", skip(state))]
pub async fn finish(state: &AppState) -> Result<ResultsSummary, SessionError> {
  let mut guard = state.session.write().await;
  let active = guard.as_mut().ok_or(SessionError::NoActiveSession)?;
  let summary = session::finish(active)?;
  state.persist(Some(&*active));

  if active.current_score.total > 0 {
    let progress = state.storage.update_progress(&active.current_score, &active.settings.student_name);
    info!(target: "session", sessions = progress.total_sessions, average = progress.average_score, "Progress updated");
  }
  Ok(summary)
}

#[instrument(level = "info", skip(state))]
pub async fn retake(state: &AppState) -> Result<SessionOut, SessionError> {
  let mut guard = state.session.write().await;
  let previous = guard.as_ref().ok_or(SessionError::NoActiveSession)?;
  let fresh = session::retake(&mut fresh_rng(), previous, &state.limits(), now_millis())?;
  state.persist(Some(&fresh));
  *guard = Some(fresh);
  Ok(to_session_out(guard.as_ref()))
}

/// Back to setup; the current session is discarded.
pub async fn reset(state: &AppState) -> SessionOut {
  let mut guard = state.session.write().await;
  *guard = None;
  state.persist(None);
  info!(target: "session", "Session reset");
  to_session_out(None)
}

pub fn get_settings(state: &AppState) -> Settings {
  state.settings()
}

pub fn put_settings(state: &AppState, settings: Settings) -> Result<Settings, SessionError> {
  session::validate(&settings)?;
  state.storage.save_settings(&settings);
  Ok(settings)
}

pub fn get_progress(state: &AppState) -> Option<ProgressData> {
  state.storage.load_progress()
}
