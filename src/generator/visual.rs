//! Visual and statement-style families: dot-grid fractions, true/false
//! "gấp / giảm" statements and unit-suffixed calculations.

use rand::Rng;

use crate::directive::{fraction_token, FractionGridOption};
use crate::domain::{Difficulty, Problem, ProblemType, QuestionType};
use crate::generator::helpers::{coin, create_problem_as, create_text_problem, pick, random_int};

const GRID_LABELS: [&str; 4] = ["A", "B", "C", "D"];
const MAX_WRONG_COUNT_ATTEMPTS: usize = 10;

fn grid_shape<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> (u32, u32, u32) {
  match difficulty {
    Difficulty::Easy => {
      let denominator = *pick(rng, &[2u32, 4]);
      let cols = if denominator == 2 { random_int(rng, 2, 4) as u32 } else { 4 };
      (denominator, 2, cols)
    }
    Difficulty::Medium => {
      let denominator = *pick(rng, &[2u32, 3, 4]);
      match denominator {
        3 => (3, 3, random_int(rng, 2, 4) as u32),
        2 => (2, 2, random_int(rng, 3, 5) as u32),
        _ => (denominator, 2, 4),
      }
    }
    Difficulty::Hard => {
      let denominator = *pick(rng, &[3u32, 4, 5]);
      match denominator {
        5 => (5, random_int(rng, 2, 3) as u32, 5),
        3 => (3, 3, random_int(rng, 3, 5) as u32),
        _ => (denominator, 4, random_int(rng, 3, 4) as u32),
      }
    }
  }
}

/// A circled count not yet in `used`, drawn near `correct`.
fn wrong_circled_count<R: Rng + ?Sized>(rng: &mut R, correct: u32, total: u32, used: &[u32]) -> u32 {
  for _ in 0..MAX_WRONG_COUNT_ATTEMPTS {
    let candidate = (correct as i64 + random_int(rng, -2, 2)).clamp(1, total as i64 - 1) as u32;
    if !used.contains(&candidate) {
      return candidate;
    }
  }
  // nearest unused count, empty and full grids included
  (1..=total)
    .flat_map(|step| [correct.checked_sub(step), Some(correct + step)])
    .flatten()
    .find(|c| *c <= total && !used.contains(c))
    .unwrap_or(0)
}

pub fn visual_fraction<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (denominator, mut rows, cols) = grid_shape(rng, difficulty);
  if (rows * cols) % denominator != 0 {
    rows = denominator;
  }
  let total = rows * cols;
  let correct = total / denominator;
  let correct_index = random_int(rng, 0, 3) as usize;

  let mut used = vec![correct];
  let mut grids = Vec::with_capacity(GRID_LABELS.len());
  for (i, label) in GRID_LABELS.iter().enumerate() {
    let circled_count = if i == correct_index {
      correct
    } else {
      let wrong = wrong_circled_count(rng, correct, total, &used);
      used.push(wrong);
      wrong
    };
    grids.push(FractionGridOption { rows, cols, circled_count, label: label.to_string() });
  }

  let question = format!("{} Hình nào đã khoanh vào 1/{denominator} số chấm tròn?", fraction_token(&grids));
  create_text_problem(
    ProblemType::VisualFraction,
    question,
    correct_index as i64,
    GRID_LABELS[correct_index].to_string(),
    GRID_LABELS.iter().map(|l| l.to_string()).collect(),
  )
}

const STATEMENT_UNITS: [&str; 7] = ["g", "kg", "km", "m", "cm", "dm", "l"];

fn off_by<R: Rng + ?Sized>(rng: &mut R, value: i64, max_shift: i64) -> i64 {
  let shift = random_int(rng, 1, max_shift);
  let shown = if coin(rng) { value + shift } else { value - shift };
  if shown <= 0 {
    value + random_int(rng, 1, max_shift)
  } else {
    shown
  }
}

pub fn true_false_multiply_divide<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let is_multiply = coin(rng);
  let is_true = coin(rng);
  let unit = *pick(rng, &STATEMENT_UNITS);

  let (base, multiplier) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 10), random_int(rng, 2, 5)),
    Difficulty::Medium => (random_int(rng, 5, 20), random_int(rng, 3, 8)),
    Difficulty::Hard => (random_int(rng, 10, 50), random_int(rng, 4, 9)),
  };

  let statement = if is_multiply {
    let result = base * multiplier;
    let shown = if is_true { result } else { off_by(rng, result, 5) };
    format!("Gấp {base}{unit} lên {multiplier} lần sẽ được {shown}{unit}")
  } else {
    let start = base * multiplier;
    let shown = if is_true { base } else { off_by(rng, base, 3) };
    format!("Giảm {start}{unit} đi {multiplier} lần sẽ được {shown}{unit}")
  };

  let question = format!("Đúng ghi Đ, sai ghi S: {statement}");
  let text_answer = if is_true { "Đ" } else { "S" };
  create_text_problem(
    ProblemType::TrueFalseMultiplyDivide,
    question,
    i64::from(is_true),
    text_answer.to_string(),
    vec!["Đ".to_string(), "S".to_string()],
  )
}

const UNIT_GROUPS: [&[&str]; 3] = [&["g", "kg"], &["m", "dm", "cm", "mm"], &["l", "ml"]];

pub fn unit_calculation<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let op = *pick(rng, &['+', '-', '×', ':']);
  let group = *pick(rng, &UNIT_GROUPS);
  let unit = *pick(rng, group);

  let (a, b, answer) = match op {
    '+' | '-' => {
      let (mut a, mut b) = match difficulty {
        Difficulty::Easy => (random_int(rng, 10, 50), random_int(rng, 5, 30)),
        Difficulty::Medium => (random_int(rng, 20, 100), random_int(rng, 10, 50)),
        Difficulty::Hard => (random_int(rng, 50, 200), random_int(rng, 20, 100)),
      };
      if op == '-' && b > a {
        std::mem::swap(&mut a, &mut b);
      }
      (a, b, if op == '+' { a + b } else { a - b })
    }
    '×' => {
      let (a, b) = match difficulty {
        Difficulty::Easy => (random_int(rng, 2, 10), random_int(rng, 2, 5)),
        Difficulty::Medium => (random_int(rng, 5, 20), random_int(rng, 2, 8)),
        Difficulty::Hard => (random_int(rng, 10, 50), random_int(rng, 3, 9)),
      };
      (a, b, a * b)
    }
    _ => {
      let (b, quotient) = match difficulty {
        Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 2, 10)),
        Difficulty::Medium => (random_int(rng, 2, 8), random_int(rng, 5, 20)),
        Difficulty::Hard => (random_int(rng, 3, 9), random_int(rng, 10, 50)),
      };
      (b * quotient, b, quotient)
    }
  };

  // scalar right operand for × and :
  let right = match op {
    '×' | ':' => b.to_string(),
    _ => format!("{b}{unit}"),
  };
  let question = format!("Tính: {a}{unit} {op} {right} = ?{unit}");
  create_problem_as(rng, ProblemType::UnitCalculation, question, answer, QuestionType::Input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::directive::{parse_question, Directive};
  use crate::generator::dedup::extract_numbers;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  #[test]
  fn visual_fraction_marks_exactly_one_correct_grid() {
    let mut rng = StdRng::seed_from_u64(51);
    for d in LEVELS {
      for _ in 0..200 {
        let p = visual_fraction(&mut rng, d);
        let parsed = parse_question(&p.question);
        let Some(Directive::FractionOptions { options }) = parsed.directive else {
          panic!("missing grid directive: {}", p.question);
        };
        let denominator = extract_numbers(&parsed.display)[1] as u32;
        assert_eq!(options.len(), 4);

        let idx = p.answer as usize;
        let total = options[idx].total();
        assert_eq!(total % denominator, 0);
        assert_eq!(options[idx].circled_count, total / denominator);
        assert_eq!(p.text_answer.as_deref(), Some(GRID_LABELS[idx]));

        let mut counts: Vec<u32> = options.iter().map(|o| o.circled_count).collect();
        assert!(counts.iter().all(|c| *c <= total));
        counts.sort_unstable();
        counts.dedup();
        assert_eq!(counts.len(), 4, "{:?}", options);
      }
    }
  }

  #[test]
  fn true_false_answer_matches_the_statement() {
    let mut rng = StdRng::seed_from_u64(52);
    for d in LEVELS {
      for _ in 0..200 {
        let p = true_false_multiply_divide(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (left, times, shown) = (n[0], n[1], n[2]);
        let holds = if p.question.contains("Gấp") { left * times == shown } else { left / times == shown };
        assert_eq!(p.answer, i64::from(holds), "{}", p.question);
        assert_eq!(p.text_answer.as_deref(), Some(if holds { "Đ" } else { "S" }));
        assert_eq!(p.text_options.as_deref(), Some(&["Đ".to_string(), "S".to_string()][..]));
      }
    }
  }

  #[test]
  fn unit_calculation_is_input_only_and_exact() {
    let mut rng = StdRng::seed_from_u64(53);
    for d in LEVELS {
      for _ in 0..200 {
        let p = unit_calculation(&mut rng, d);
        assert_eq!(p.question_type, QuestionType::Input);
        assert!(p.options.is_none());
        let n: Vec<i64> = extract_numbers(&p.question).into_iter().map(|v| v as i64).collect();
        let expected = if p.question.contains(" + ") {
          n[0] + n[1]
        } else if p.question.contains(" - ") {
          n[0] - n[1]
        } else if p.question.contains('×') {
          n[0] * n[1]
        } else {
          assert_eq!(n[0] % n[1], 0);
          n[0] / n[1]
        };
        assert_eq!(p.answer, expected, "{}", p.question);
        assert!(p.answer >= 0);
      }
    }
  }
}
