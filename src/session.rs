//! Test-session flow: `Setup → Testing → Results`.
//!
//! A session is a `SessionData` record; these functions are the only
//! mutators. There is no stored phase: no record means `Setup`, a record with
//! `is_completed` means `Results`, anything else is `Testing`.

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{ScoreData, SessionData, Settings};
use crate::generator::{generate_unique_problems, BatchLimits, EngineError};
use crate::scoring::{self, ResultsSummary, Submission};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Setup,
  Testing,
  Results,
}

pub fn phase(session: Option<&SessionData>) -> Phase {
  match session {
    None => Phase::Setup,
    Some(s) if s.is_completed => Phase::Results,
    Some(_) => Phase::Testing,
  }
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
  #[error("no active test session")]
  NoActiveSession,
  #[error("invalid settings: {0}")]
  InvalidSettings(&'static str),
  #[error("unknown problem id: {0}")]
  UnknownProblem(String),
  #[error("problem {0} was already answered")]
  AlreadyAnswered(String),
  #[error("submission does not fit problem {0}")]
  SubmissionMismatch(String),
  #[error("problem index {index} out of range (0..{len})")]
  IndexOutOfRange { index: usize, len: usize },
  #[error("the test is already finished")]
  AlreadyCompleted,
  #[error(transparent)]
  Engine(#[from] EngineError),
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
  pub problem_id: String,
  pub correct: bool,
  pub score: ScoreData,
  /// Numeric answer or the text answer, for feedback display.
  pub expected: String,
}

/// Settings a test can start from: at least one type and one question.
pub fn validate(settings: &Settings) -> Result<(), SessionError> {
  if settings.enabled_types.is_empty() {
    return Err(SessionError::InvalidSettings("select at least one problem type"));
  }
  if settings.question_quantity == 0 {
    return Err(SessionError::InvalidSettings("question quantity must be at least 1"));
  }
  Ok(())
}

/// New session with a freshly generated batch.
pub fn start<R: Rng + ?Sized>(
  rng: &mut R,
  settings: Settings,
  limits: &BatchLimits,
  now_ms: i64,
) -> Result<SessionData, SessionError> {
  validate(&settings)?;
  let problems = generate_unique_problems(
    rng,
    &settings.enabled_types,
    settings.question_quantity,
    settings.difficulty,
    limits,
  )?;
  info!(
    target: "session",
    problems = problems.len(),
    difficulty = settings.difficulty.as_str(),
    student = %settings.student_name,
    "Test started"
  );
  Ok(SessionData {
    current_score: ScoreData::default(),
    total_marks: problems.len(),
    problems,
    current_problem_index: 0,
    settings,
    start_time: now_ms,
    is_completed: false,
  })
}

/// Records one answer. Each problem can be answered once.
pub fn answer(session: &mut SessionData, problem_id: &str, submission: &Submission) -> Result<AnswerOutcome, SessionError> {
  if session.is_completed {
    return Err(SessionError::AlreadyCompleted);
  }
  let problem = session
    .problems
    .iter_mut()
    .find(|p| p.id == problem_id)
    .ok_or_else(|| SessionError::UnknownProblem(problem_id.to_string()))?;
  if problem.is_answered {
    return Err(SessionError::AlreadyAnswered(problem_id.to_string()));
  }
  let correct = scoring::check_answer(problem, submission)
    .ok_or_else(|| SessionError::SubmissionMismatch(problem_id.to_string()))?;

  match submission {
    Submission::Number(n) => problem.user_answer = Some(*n),
    Submission::Text(t) => {
      problem.user_text_answer = Some(t.clone());
      problem.user_answer = t.trim().parse().ok();
    }
  }
  problem.is_answered = true;
  problem.is_correct = Some(correct);
  let expected = problem.text_answer.clone().unwrap_or_else(|| problem.answer.to_string());

  scoring::record(&mut session.current_score, correct);
  debug!(target: "session", %problem_id, correct, streak = session.current_score.streak, "Answer recorded");

  Ok(AnswerOutcome {
    problem_id: problem_id.to_string(),
    correct,
    score: session.current_score.clone(),
    expected,
  })
}

pub fn navigate(session: &mut SessionData, index: usize) -> Result<(), SessionError> {
  let len = session.problems.len();
  if index >= len {
    return Err(SessionError::IndexOutOfRange { index, len });
  }
  session.current_problem_index = index;
  Ok(())
}

/// Results view of a session, finished or not.
pub fn summarize(session: &SessionData) -> ResultsSummary {
  let total_marks = session.problems.len();
  let percentage = scoring::percentage(session.current_score.correct, total_marks as u32);
  ResultsSummary {
    student_name: session.settings.student_name.clone(),
    correct: session.current_score.correct,
    answered: session.current_score.total,
    total_marks,
    percentage,
    grade_message: scoring::grade_message(percentage),
    best_streak: session.current_score.best_streak,
    by_type: scoring::breakdown(&session.problems),
  }
}

/// Moves to `Results`. Unanswered problems count as wrong.
pub fn finish(session: &mut SessionData) -> Result<ResultsSummary, SessionError> {
  if session.is_completed {
    return Err(SessionError::AlreadyCompleted);
  }
  session.is_completed = true;
  session.total_marks = session.problems.len();
  let summary = summarize(session);
  info!(
    target: "session",
    correct = summary.correct,
    total_marks = summary.total_marks,
    percentage = summary.percentage,
    "Test finished"
  );
  Ok(summary)
}

/// Same settings, new batch, fresh score.
pub fn retake<R: Rng + ?Sized>(
  rng: &mut R,
  previous: &SessionData,
  limits: &BatchLimits,
  now_ms: i64,
) -> Result<SessionData, SessionError> {
  start(rng, previous.settings.clone(), limits, now_ms)
}
