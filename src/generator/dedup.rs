//! Normalization keys: two problems with the same key are "the same fact" and
//! may not both appear in one batch.
//!
//! Keys per family:
//! - word problems, geometry, review families and the semester-1 umbrella:
//!   `type:` + every integer literal of the question, sorted ascending.
//! - `×`/`*` questions: `mult:min×max`.
//! - `+` questions: `add:min+max`.
//! - `-` questions: `sub:a-b` (operand order kept).
//! - `:` questions: `div:min×max=dividend` for exact divisions, else
//!   `div:dividend:divisor`.
//! - anything else: `fallback:` + the literal question.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Problem, ProblemType};

fn numbers_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

fn mult_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"([0-9]+)\s*[×*]\s*([0-9]+)").expect("static regex"))
}

fn add_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"([0-9]+)\s*\+\s*([0-9]+)").expect("static regex"))
}

fn sub_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"([0-9]+)\s*-\s*([0-9]+)").expect("static regex"))
}

fn div_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"([0-9]+)\s*:\s*([0-9]+)").expect("static regex"))
}

fn keys_by_numbers(kind: ProblemType) -> bool {
  matches!(
    kind,
    ProblemType::WordProblemMoreLess
      | ProblemType::WordProblemMultiplyDivide
      | ProblemType::WordProblemUnitConversion
      | ProblemType::WordProblemDivisionRemainder
      | ProblemType::GeometryMidpoint
      | ProblemType::GeometryCircle
      | ProblemType::GeometryRectangle
      | ProblemType::GeometrySquare
      | ProblemType::ReviewClockReading
      | ProblemType::ReviewFractionOfNumber
      | ProblemType::ReviewWrittenCalculation
      | ProblemType::ReviewBrokenLine
      | ProblemType::ReviewChainCalculation
      | ProblemType::ReviewFillBlank
      | ProblemType::ReviewSemester1
  )
}

/// Integer literals in source order.
pub fn extract_numbers(text: &str) -> Vec<u64> {
  numbers_re()
    .find_iter(text)
    .filter_map(|m| m.as_str().parse::<u64>().ok())
    .collect()
}

fn operand_pair(re: &Regex, question: &str) -> Option<(u64, u64)> {
  let caps = re.captures(question)?;
  let a = caps.get(1)?.as_str().parse::<u64>().ok()?;
  let b = caps.get(2)?.as_str().parse::<u64>().ok()?;
  Some((a, b))
}

fn operator_key(question: &str) -> Option<String> {
  if question.contains('×') || question.contains('*') {
    let (a, b) = operand_pair(mult_re(), question)?;
    Some(format!("mult:{}×{}", a.min(b), a.max(b)))
  } else if question.contains('+') {
    let (a, b) = operand_pair(add_re(), question)?;
    Some(format!("add:{}+{}", a.min(b), a.max(b)))
  } else if question.contains('-') {
    let (a, b) = operand_pair(sub_re(), question)?;
    Some(format!("sub:{a}-{b}"))
  } else if question.contains(':') {
    let (dividend, divisor) = operand_pair(div_re(), question)?;
    if divisor != 0 && dividend % divisor == 0 && dividend / divisor > 0 {
      let quotient = dividend / divisor;
      Some(format!("div:{}×{}={}", divisor.min(quotient), divisor.max(quotient), dividend))
    } else {
      Some(format!("div:{dividend}:{divisor}"))
    }
  } else {
    None
  }
}

/// Canonical dedup key of a problem. Pure: same problem, same key.
pub fn normalized_key(problem: &Problem) -> String {
  let question = problem.question.as_str();
  if keys_by_numbers(problem.kind) {
    let mut numbers = extract_numbers(question);
    numbers.sort_unstable();
    let joined = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",");
    return format!("{}:{}", problem.kind.as_str(), joined);
  }
  operator_key(question).unwrap_or_else(|| format!("fallback:{question}"))
}
