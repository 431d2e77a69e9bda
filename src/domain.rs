//! Domain models shared by the engine, the session flow and the API:
//! problem families, difficulty, the problem record itself, and the persisted
//! session/progress/settings records.

use serde::{Deserialize, Serialize};

/// Problem family. The serialized names are the wire/storage tags.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
  Addition,
  Subtraction,
  Multiplication,
  Division,
  MultiplicationTable,
  DivisionTable,
  TwoDigitMultiply,
  DivisionWithRemainder,
  TwoDigitDivide,
  ThreeDigitMultiply,
  ThreeDigitDivide,
  WordProblemMoreLess,
  WordProblemMultiplyDivide,
  WordProblemUnitConversion,
  WordProblemDivisionRemainder,
  GeometryMidpoint,
  GeometryCircle,
  GeometryRectangle,
  GeometrySquare,
  ReviewClockReading,
  ReviewFractionOfNumber,
  ReviewWrittenCalculation,
  ReviewBrokenLine,
  ReviewChainCalculation,
  ReviewFillBlank,
  VisualFraction,
  TrueFalseMultiplyDivide,
  UnitCalculation,
  /// Umbrella: delegates to one of [`SEMESTER_1_TYPES`] and relabels the result.
  ReviewSemester1,
}

/// Sub-families mixed by the semester-1 review umbrella.
pub const SEMESTER_1_TYPES: [ProblemType; 18] = [
  ProblemType::TwoDigitMultiply,
  ProblemType::TwoDigitDivide,
  ProblemType::ThreeDigitMultiply,
  ProblemType::ThreeDigitDivide,
  ProblemType::DivisionWithRemainder,
  ProblemType::WordProblemMoreLess,
  ProblemType::WordProblemMultiplyDivide,
  ProblemType::WordProblemDivisionRemainder,
  ProblemType::GeometryCircle,
  ProblemType::ReviewClockReading,
  ProblemType::ReviewFractionOfNumber,
  ProblemType::ReviewWrittenCalculation,
  ProblemType::ReviewBrokenLine,
  ProblemType::ReviewChainCalculation,
  ProblemType::ReviewFillBlank,
  ProblemType::VisualFraction,
  ProblemType::TrueFalseMultiplyDivide,
  ProblemType::UnitCalculation,
];

impl ProblemType {
  pub const ALL: [ProblemType; 29] = [
    ProblemType::Addition,
    ProblemType::Subtraction,
    ProblemType::Multiplication,
    ProblemType::Division,
    ProblemType::MultiplicationTable,
    ProblemType::DivisionTable,
    ProblemType::TwoDigitMultiply,
    ProblemType::DivisionWithRemainder,
    ProblemType::TwoDigitDivide,
    ProblemType::ThreeDigitMultiply,
    ProblemType::ThreeDigitDivide,
    ProblemType::WordProblemMoreLess,
    ProblemType::WordProblemMultiplyDivide,
    ProblemType::WordProblemUnitConversion,
    ProblemType::WordProblemDivisionRemainder,
    ProblemType::GeometryMidpoint,
    ProblemType::GeometryCircle,
    ProblemType::GeometryRectangle,
    ProblemType::GeometrySquare,
    ProblemType::ReviewClockReading,
    ProblemType::ReviewFractionOfNumber,
    ProblemType::ReviewWrittenCalculation,
    ProblemType::ReviewBrokenLine,
    ProblemType::ReviewChainCalculation,
    ProblemType::ReviewFillBlank,
    ProblemType::VisualFraction,
    ProblemType::TrueFalseMultiplyDivide,
    ProblemType::UnitCalculation,
    ProblemType::ReviewSemester1,
  ];

  /// Wire tag, identical to the serde name. Used as the prefix of dedup keys.
  pub fn as_str(self) -> &'static str {
    match self {
      ProblemType::Addition => "addition",
      ProblemType::Subtraction => "subtraction",
      ProblemType::Multiplication => "multiplication",
      ProblemType::Division => "division",
      ProblemType::MultiplicationTable => "multiplication_table",
      ProblemType::DivisionTable => "division_table",
      ProblemType::TwoDigitMultiply => "two_digit_multiply",
      ProblemType::DivisionWithRemainder => "division_with_remainder",
      ProblemType::TwoDigitDivide => "two_digit_divide",
      ProblemType::ThreeDigitMultiply => "three_digit_multiply",
      ProblemType::ThreeDigitDivide => "three_digit_divide",
      ProblemType::WordProblemMoreLess => "word_problem_more_less",
      ProblemType::WordProblemMultiplyDivide => "word_problem_multiply_divide",
      ProblemType::WordProblemUnitConversion => "word_problem_unit_conversion",
      ProblemType::WordProblemDivisionRemainder => "word_problem_division_remainder",
      ProblemType::GeometryMidpoint => "geometry_midpoint",
      ProblemType::GeometryCircle => "geometry_circle",
      ProblemType::GeometryRectangle => "geometry_rectangle",
      ProblemType::GeometrySquare => "geometry_square",
      ProblemType::ReviewClockReading => "review_clock_reading",
      ProblemType::ReviewFractionOfNumber => "review_fraction_of_number",
      ProblemType::ReviewWrittenCalculation => "review_written_calculation",
      ProblemType::ReviewBrokenLine => "review_broken_line",
      ProblemType::ReviewChainCalculation => "review_chain_calculation",
      ProblemType::ReviewFillBlank => "review_fill_blank",
      ProblemType::VisualFraction => "visual_fraction",
      ProblemType::TrueFalseMultiplyDivide => "true_false_multiply_divide",
      ProblemType::UnitCalculation => "unit_calculation",
      ProblemType::ReviewSemester1 => "review_semester_1",
    }
  }

  pub fn parse(tag: &str) -> Option<ProblemType> {
    ProblemType::ALL.iter().copied().find(|t| t.as_str() == tag)
  }
}

impl std::fmt::Display for ProblemType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Coarse difficulty tag; each family maps it to its own numeric ranges.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }

  pub fn parse(tag: &str) -> Option<Difficulty> {
    match tag.trim().to_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }
}

/// How the answer is collected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  Input,
  MultipleChoice,
}

/// The unit produced by the engine.
///
/// `question` may start with a renderer directive token (`[CLOCK:h:m]` or
/// `[FRACTION_OPTIONS:<json>]`); the engine never interprets it, see
/// `crate::directive` for the parser used by the API layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: ProblemType,
  /// Set only when the problem was relabeled to the semester-1 umbrella.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_type: Option<ProblemType>,
  pub question: String,
  pub answer: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text_answer: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text_options: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<i64>>,
  pub question_type: QuestionType,

  // Answering flow
  #[serde(default)]
  pub is_answered: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_answer: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_text_answer: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_correct: Option<bool>,
}

impl Problem {
  /// The family used for statistics: the true family behind an umbrella label.
  pub fn effective_type(&self) -> ProblemType {
    self.original_type.unwrap_or(self.kind)
  }

  pub fn has_text_answer(&self) -> bool {
    self.text_options.is_some()
  }
}

/// Immutable input to a generation batch. Missing fields take the defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
  pub enabled_types: Vec<ProblemType>,
  pub difficulty: Difficulty,
  pub question_quantity: usize,
  pub student_name: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      enabled_types: vec![
        ProblemType::Addition,
        ProblemType::Subtraction,
        ProblemType::MultiplicationTable,
        ProblemType::DivisionTable,
        ProblemType::TwoDigitMultiply,
        ProblemType::TwoDigitDivide,
      ],
      difficulty: Difficulty::Medium,
      question_quantity: 25,
      student_name: String::new(),
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
  pub correct: u32,
  pub total: u32,
  pub streak: u32,
  pub best_streak: u32,
}

/// One test session as persisted and served to the client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
  pub current_score: ScoreData,
  pub problems: Vec<Problem>,
  pub current_problem_index: usize,
  pub settings: Settings,
  /// Epoch milliseconds.
  pub start_time: i64,
  #[serde(default)]
  pub is_completed: bool,
  #[serde(default)]
  pub total_marks: usize,
}

/// Lifetime statistics across finished sessions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
  pub total_sessions: u32,
  pub total_problems: u32,
  pub total_correct: u32,
  pub best_streak: u32,
  pub average_score: f64,
  pub last_played: String,
  #[serde(default)]
  pub student_name: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn problem_type_tags_match_serde_names() {
    for t in ProblemType::ALL {
      let json = serde_json::to_string(&t).expect("serialize");
      assert_eq!(json, format!("\"{}\"", t.as_str()));
      assert_eq!(ProblemType::parse(t.as_str()), Some(t));
    }
  }

  #[test]
  fn problem_serializes_with_camel_case_and_type_field() {
    let p = Problem {
      id: "x".into(),
      kind: ProblemType::ReviewSemester1,
      original_type: Some(ProblemType::GeometryCircle),
      question: "Q".into(),
      answer: 4,
      text_answer: None,
      text_options: None,
      options: Some(vec![1, 2, 3, 4]),
      question_type: QuestionType::MultipleChoice,
      is_answered: false,
      user_answer: None,
      user_text_answer: None,
      is_correct: None,
    };
    let v = serde_json::to_value(&p).expect("serialize");
    assert_eq!(v["type"], "review_semester_1");
    assert_eq!(v["originalType"], "geometry_circle");
    assert_eq!(v["questionType"], "multiple_choice");
    assert!(v.get("textAnswer").is_none());
    assert_eq!(p.effective_type(), ProblemType::GeometryCircle);
  }

  #[test]
  fn settings_default_difficulty_is_medium() {
    let s: Settings = serde_json::from_str(r#"{"enabledTypes":["addition"],"questionQuantity":3}"#).expect("parse");
    assert_eq!(s.difficulty, Difficulty::Medium);
    assert_eq!(s.enabled_types, vec![ProblemType::Addition]);
    assert!(s.student_name.is_empty());
  }
}
