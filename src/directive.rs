//! Rendering directives embedded at the start of a question.
//!
//! Two directives exist:
//! - `[CLOCK:h:m]` asks the client to draw an analog clock.
//! - `[FRACTION_OPTIONS:<json>]` carries four dot grids for a visual fraction
//!   question, as a JSON array of `FractionGridOption`.
//!
//! The engine keeps the token inside `Problem::question` (dedup keys and
//! stored sessions see the raw text). The API layer splits it out so clients
//! get a clean display string plus a typed directive.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One dot grid in a visual fraction question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FractionGridOption {
  pub rows: u32,
  pub cols: u32,
  pub circled_count: u32,
  pub label: String,
}

impl FractionGridOption {
  pub fn total(&self) -> u32 {
    self.rows * self.cols
  }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
  Clock { hour: u32, minute: u32 },
  FractionOptions { options: Vec<FractionGridOption> },
}

/// Question split into display text and an optional directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedQuestion {
  pub display: String,
  pub directive: Option<Directive>,
}

fn clock_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^\[CLOCK:([0-9]+):([0-9]+)\]\s*(.*)$").expect("static regex"))
}

fn fraction_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?s)^\[FRACTION_OPTIONS:(\[.*\])\]\s*(.*)$").expect("static regex"))
}

/// Serialized form used when building a visual fraction question.
pub fn fraction_token(options: &[FractionGridOption]) -> String {
  let json = serde_json::to_string(options).unwrap_or_else(|_| "[]".into());
  format!("[FRACTION_OPTIONS:{json}]")
}

/// Splits a leading directive off `question`.
///
/// Malformed tokens are left in place and reported as no directive.
pub fn parse_question(question: &str) -> ParsedQuestion {
  if let Some(caps) = clock_re().captures(question) {
    let hour = caps[1].parse::<u32>();
    let minute = caps[2].parse::<u32>();
    if let (Ok(hour), Ok(minute)) = (hour, minute) {
      return ParsedQuestion {
        display: caps[3].to_string(),
        directive: Some(Directive::Clock { hour, minute }),
      };
    }
  }

  if let Some(caps) = fraction_re().captures(question) {
    if let Ok(options) = serde_json::from_str::<Vec<FractionGridOption>>(&caps[1]) {
      return ParsedQuestion {
        display: caps[2].to_string(),
        directive: Some(Directive::FractionOptions { options }),
      };
    }
  }

  ParsedQuestion { display: question.to_string(), directive: None }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clock_token_is_split() {
    let parsed = parse_question("[CLOCK:3:15] Đồng hồ chỉ mấy giờ?");
    assert_eq!(parsed.display, "Đồng hồ chỉ mấy giờ?");
    assert_eq!(parsed.directive, Some(Directive::Clock { hour: 3, minute: 15 }));
  }

  #[test]
  fn fraction_token_survives_a_trip_through_the_question() {
    let grids = vec![
      FractionGridOption { rows: 2, cols: 3, circled_count: 3, label: "A".into() },
      FractionGridOption { rows: 2, cols: 2, circled_count: 1, label: "B".into() },
    ];
    let question = format!("{} Hình nào đã khoanh vào 1/2 số chấm tròn?", fraction_token(&grids));
    assert!(question.contains(r#""circledCount":3"#));

    let parsed = parse_question(&question);
    assert_eq!(parsed.display, "Hình nào đã khoanh vào 1/2 số chấm tròn?");
    assert_eq!(parsed.directive, Some(Directive::FractionOptions { options: grids }));
  }

  #[test]
  fn plain_questions_pass_through() {
    let parsed = parse_question("12 + 7 = ?");
    assert_eq!(parsed.display, "12 + 7 = ?");
    assert!(parsed.directive.is_none());
  }

  #[test]
  fn broken_json_is_not_a_directive() {
    let q = "[FRACTION_OPTIONS:[{\"rows\":2}]] Hình nào?";
    let parsed = parse_question(q);
    assert_eq!(parsed.display, q);
    assert!(parsed.directive.is_none());
  }

  #[test]
  fn directive_serializes_with_kind_tag() {
    let json = serde_json::to_value(Directive::Clock { hour: 9, minute: 0 }).unwrap();
    assert_eq!(json["kind"], "clock");
    assert_eq!(json["hour"], 9);
  }
}
