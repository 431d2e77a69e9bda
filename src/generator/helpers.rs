//! Shared helpers for the family generators: integer draws, the times-table
//! range resolver, id allocation and the common problem constructor.

use rand::Rng;
use uuid::Uuid;

use crate::domain::{Difficulty, Problem, ProblemType, QuestionType};
use crate::generator::options::build_options;

/// Inclusive numeric span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
  pub min: i64,
  pub max: i64,
}

/// Bare operand span for the times-table families.
pub fn range_for(difficulty: Difficulty) -> Span {
  match difficulty {
    Difficulty::Easy => Span { min: 1, max: 5 },
    Difficulty::Medium => Span { min: 3, max: 8 },
    Difficulty::Hard => Span { min: 6, max: 9 },
  }
}

/// Uniform integer in `[min, max]`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
  rng.gen_range(min..=max)
}

/// Uniform pick from a non-empty static table.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
  &items[rng.gen_range(0..items.len())]
}

pub fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
  rng.gen_bool(0.5)
}

pub fn new_problem_id() -> String {
  Uuid::new_v4().to_string()
}

/// Numeric problem; the question mode is a fair coin flip.
pub fn create_problem<R: Rng + ?Sized>(rng: &mut R, kind: ProblemType, question: String, answer: i64) -> Problem {
  let question_type = if coin(rng) { QuestionType::MultipleChoice } else { QuestionType::Input };
  create_problem_as(rng, kind, question, answer, question_type)
}

/// Numeric problem with a forced question mode.
pub fn create_problem_as<R: Rng + ?Sized>(
  rng: &mut R,
  kind: ProblemType,
  question: String,
  answer: i64,
  question_type: QuestionType,
) -> Problem {
  let options = match question_type {
    QuestionType::MultipleChoice => Some(build_options(rng, answer)),
    QuestionType::Input => None,
  };
  Problem {
    id: new_problem_id(),
    kind,
    original_type: None,
    question,
    answer,
    text_answer: None,
    text_options: None,
    options,
    question_type,
    is_answered: false,
    user_answer: None,
    user_text_answer: None,
    is_correct: None,
  }
}

/// Text-answer problem; always multiple choice over `text_options`.
pub fn create_text_problem(
  kind: ProblemType,
  question: String,
  answer: i64,
  text_answer: String,
  text_options: Vec<String>,
) -> Problem {
  Problem {
    id: new_problem_id(),
    kind,
    original_type: None,
    question,
    answer,
    text_answer: Some(text_answer),
    text_options: Some(text_options),
    options: None,
    question_type: QuestionType::MultipleChoice,
    is_answered: false,
    user_answer: None,
    user_text_answer: None,
    is_correct: None,
  }
}
