//! Family dispatch and batch generation.
//!
//! `generate_unique_problems` is a rejection loop over `normalized_key`:
//! draw, key, keep if unseen. Every draw counts against
//! `BatchLimits::max_batch_attempts`; running out is reported as
//! `EngineError::InsufficientDistinctProblems` instead of spinning forever.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::domain::{Difficulty, Problem, ProblemType, SEMESTER_1_TYPES};
use crate::generator::dedup::normalized_key;
use crate::generator::helpers::pick;
use crate::generator::{advanced, arithmetic, geometry, review, tables, visual, word_problems};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
  #[error("no problem types enabled")]
  NoEnabledTypes,
  #[error("only {produced} of {requested} distinct problems after {attempts} attempts; enable more types or lower the quantity")]
  InsufficientDistinctProblems { requested: usize, produced: usize, attempts: usize },
}

/// Caps for the batch rejection loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchLimits {
  pub max_batch_attempts: usize,
}

impl Default for BatchLimits {
  fn default() -> Self {
    Self { max_batch_attempts: 10_000 }
  }
}

/// One problem of `kind`.
///
/// The semester-1 umbrella delegates to a random sub-family and comes back
/// relabeled, with the true family kept in `original_type`.
pub fn generate_problem<R: Rng + ?Sized>(rng: &mut R, kind: ProblemType, difficulty: Difficulty) -> Problem {
  match kind {
    ProblemType::Addition => arithmetic::addition(rng, difficulty),
    ProblemType::Subtraction => arithmetic::subtraction(rng, difficulty),
    ProblemType::Multiplication => arithmetic::multiplication(rng, difficulty),
    ProblemType::Division => arithmetic::division(rng, difficulty),
    ProblemType::MultiplicationTable => tables::multiplication_table(rng, difficulty),
    ProblemType::DivisionTable => tables::division_table(rng, difficulty),
    ProblemType::TwoDigitMultiply => advanced::two_digit_multiply(rng, difficulty),
    ProblemType::DivisionWithRemainder => advanced::division_with_remainder(rng, difficulty),
    ProblemType::TwoDigitDivide => advanced::two_digit_divide(rng, difficulty),
    ProblemType::ThreeDigitMultiply => advanced::three_digit_multiply(rng, difficulty),
    ProblemType::ThreeDigitDivide => advanced::three_digit_divide(rng, difficulty),
    ProblemType::WordProblemMoreLess => word_problems::more_less(rng, difficulty),
    ProblemType::WordProblemMultiplyDivide => word_problems::multiply_divide(rng, difficulty),
    ProblemType::WordProblemUnitConversion => word_problems::unit_conversion(rng, difficulty),
    ProblemType::WordProblemDivisionRemainder => word_problems::division_remainder(rng, difficulty),
    ProblemType::GeometryMidpoint => geometry::midpoint(rng, difficulty),
    ProblemType::GeometryCircle => geometry::circle(rng, difficulty),
    ProblemType::GeometryRectangle => geometry::rectangle(rng, difficulty),
    ProblemType::GeometrySquare => geometry::square(rng, difficulty),
    ProblemType::ReviewClockReading => review::clock_reading(rng, difficulty),
    ProblemType::ReviewFractionOfNumber => review::fraction_of_number(rng, difficulty),
    ProblemType::ReviewWrittenCalculation => review::written_calculation(rng, difficulty),
    ProblemType::ReviewBrokenLine => review::broken_line(rng, difficulty),
    ProblemType::ReviewChainCalculation => review::chain_calculation(rng, difficulty),
    ProblemType::ReviewFillBlank => review::fill_blank(rng, difficulty),
    ProblemType::VisualFraction => visual::visual_fraction(rng, difficulty),
    ProblemType::TrueFalseMultiplyDivide => visual::true_false_multiply_divide(rng, difficulty),
    ProblemType::UnitCalculation => visual::unit_calculation(rng, difficulty),
    ProblemType::ReviewSemester1 => {
      let sub = *pick(rng, &SEMESTER_1_TYPES);
      semester_1_problem(rng, sub, difficulty)
    }
  }
}

fn semester_1_problem<R: Rng + ?Sized>(rng: &mut R, sub: ProblemType, difficulty: Difficulty) -> Problem {
  let mut problem = generate_problem(rng, sub, difficulty);
  problem.original_type = Some(problem.kind);
  problem.kind = ProblemType::ReviewSemester1;
  problem
}

/// One problem from a uniformly chosen enabled family.
pub fn generate_random_problem<R: Rng + ?Sized>(
  rng: &mut R,
  enabled: &[ProblemType],
  difficulty: Difficulty,
) -> Result<Problem, EngineError> {
  let kind = *enabled.choose(rng).ok_or(EngineError::NoEnabledTypes)?;
  Ok(generate_problem(rng, kind, difficulty))
}

/// Accepts problems whose key has not been seen yet.
struct Batch {
  problems: Vec<Problem>,
  seen: HashSet<String>,
  attempts: usize,
  rejected: usize,
}

impl Batch {
  fn new() -> Self {
    Self { problems: Vec::new(), seen: HashSet::new(), attempts: 0, rejected: 0 }
  }

  fn offer(&mut self, problem: Problem) -> bool {
    self.attempts += 1;
    if self.seen.insert(normalized_key(&problem)) {
      self.problems.push(problem);
      true
    } else {
      self.rejected += 1;
      false
    }
  }

  fn exhausted(&self, limits: &BatchLimits) -> bool {
    self.attempts >= limits.max_batch_attempts
  }

  fn starved(&self, requested: usize) -> EngineError {
    error!(
      target: "engine",
      requested,
      produced = self.problems.len(),
      attempts = self.attempts,
      "Batch attempt cap reached before enough distinct problems"
    );
    EngineError::InsufficientDistinctProblems {
      requested,
      produced: self.problems.len(),
      attempts: self.attempts,
    }
  }
}

/// `quantity` problems with pairwise-distinct normalization keys.
///
/// With `[review_semester_1]` as the only enabled type, every one of the 18
/// sub-families is generated first (so the batch may exceed `quantity` when
/// it is below 18), then the batch is filled from the same sub-families and
/// shuffled.
#[instrument(level = "debug", skip(rng, enabled, limits), fields(enabled = enabled.len(), difficulty = difficulty.as_str()))]
pub fn generate_unique_problems<R: Rng + ?Sized>(
  rng: &mut R,
  enabled: &[ProblemType],
  quantity: usize,
  difficulty: Difficulty,
  limits: &BatchLimits,
) -> Result<Vec<Problem>, EngineError> {
  if enabled.is_empty() {
    return Err(EngineError::NoEnabledTypes);
  }

  let mut batch = Batch::new();
  // each attempt accepts at most one problem
  if quantity > limits.max_batch_attempts {
    return Err(batch.starved(quantity));
  }

  if enabled == [ProblemType::ReviewSemester1] {
    for sub in SEMESTER_1_TYPES {
      loop {
        if batch.exhausted(limits) {
          return Err(batch.starved(quantity));
        }
        if batch.offer(semester_1_problem(rng, sub, difficulty)) {
          break;
        }
      }
    }
    while batch.problems.len() < quantity {
      if batch.exhausted(limits) {
        return Err(batch.starved(quantity));
      }
      let sub = *pick(rng, &SEMESTER_1_TYPES);
      batch.offer(semester_1_problem(rng, sub, difficulty));
    }
    batch.problems.shuffle(rng);
  } else {
    while batch.problems.len() < quantity {
      if batch.exhausted(limits) {
        return Err(batch.starved(quantity));
      }
      let kind = *pick(rng, enabled);
      batch.offer(generate_problem(rng, kind, difficulty));
    }
  }

  debug!(
    target: "engine",
    accepted = batch.problems.len(),
    rejected = batch.rejected,
    attempts = batch.attempts,
    "Batch generated"
  );
  Ok(batch.problems)
}
