//! Answer checking and score bookkeeping for a test session.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::domain::{Problem, ProblemType, ScoreData};

/// What the student submitted: a number, or the text of a chosen option.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Submission {
  Number(i64),
  Text(String),
}

/// `None` when the submission kind cannot answer this problem (a bare number
/// for a text-option problem). Text answers must match the option exactly.
/// Numeric problems also accept digits as text.
pub fn check_answer(problem: &Problem, submission: &Submission) -> Option<bool> {
  match (&problem.text_answer, problem.has_text_answer(), submission) {
    (Some(expected), true, Submission::Text(t)) => Some(t == expected),
    (_, true, Submission::Number(_)) => None,
    (_, false, Submission::Number(n)) => Some(*n == problem.answer),
    (_, false, Submission::Text(t)) => t.trim().parse::<i64>().ok().map(|n| n == problem.answer),
    (None, true, Submission::Text(_)) => None,
  }
}

/// Folds one answer into the running score.
pub fn record(score: &mut ScoreData, correct: bool) {
  score.total += 1;
  if correct {
    score.correct += 1;
    score.streak += 1;
  } else {
    score.streak = 0;
  }
  score.best_streak = score.best_streak.max(score.streak);
}

/// Rounded percentage; 0 for an empty denominator.
pub fn percentage(correct: u32, out_of: u32) -> u32 {
  if out_of == 0 {
    return 0;
  }
  ((correct as f64 / out_of as f64) * 100.0).round() as u32
}

pub fn grade_message(percentage: u32) -> &'static str {
  match percentage {
    90.. => "Xuất sắc!",
    80..=89 => "Giỏi lắm!",
    70..=79 => "Khá tốt!",
    60..=69 => "Cần cố gắng thêm!",
    _ => "Hãy ôn tập lại nhé!",
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
  #[serde(rename = "type")]
  pub kind: ProblemType,
  pub label: &'static str,
  pub correct: u32,
  pub total: u32,
}

/// Per-family results in order of first appearance. Umbrella problems count
/// toward their real family.
pub fn breakdown(problems: &[Problem]) -> Vec<TypeStats> {
  let mut stats: Vec<TypeStats> = Vec::new();
  for p in problems {
    let kind = p.effective_type();
    let idx = match stats.iter().position(|s| s.kind == kind) {
      Some(i) => i,
      None => {
        stats.push(TypeStats { kind, label: catalog::label(kind), correct: 0, total: 0 });
        stats.len() - 1
      }
    };
    stats[idx].total += 1;
    if p.is_correct == Some(true) {
      stats[idx].correct += 1;
    }
  }
  stats
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
  pub student_name: String,
  pub correct: u32,
  pub answered: u32,
  pub total_marks: usize,
  pub percentage: u32,
  pub grade_message: &'static str,
  pub best_streak: u32,
  pub by_type: Vec<TypeStats>,
}
