//! Review topics (ôn tập): clock reading, fraction of a number, written
//! calculation, broken-line length, chain calculation and fill-in-the-blank.
//!
//! Clock reading and chain calculation answer with text; their `answer` field
//! still carries a numeric encoding (minutes since 0:00, and the middle value).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{coin, create_problem, create_text_problem, pick, random_int};
use crate::generator::options::fill_distinct;

const QUARTER_MINUTES: [i64; 4] = [0, 15, 30, 45];
const TEXT_OPTION_COUNT: usize = 4;
const MAX_TEXT_OPTION_ATTEMPTS: usize = 200;

/// "3 giờ đúng" / "3 giờ 15 phút".
pub fn format_time_text(hour: i64, minute: i64) -> String {
  if minute == 0 {
    format!("{hour} giờ đúng")
  } else {
    format!("{hour} giờ {minute} phút")
  }
}

fn shift_hour<R: Rng + ?Sized>(rng: &mut R, hour: i64) -> i64 {
  ((hour + random_int(rng, 1, 3) - 1) % 12) + 1
}

fn clock_text_options<R: Rng + ?Sized>(rng: &mut R, hour: i64, minute: i64) -> Vec<String> {
  let correct = format_time_text(hour, minute);
  let mut options = vec![correct.clone()];
  let mut attempts = 0;

  while options.len() < TEXT_OPTION_COUNT && attempts < MAX_TEXT_OPTION_ATTEMPTS {
    attempts += 1;
    let (wrong_hour, wrong_minute) = match random_int(rng, 0, 3) {
      0 => (shift_hour(rng, hour), minute),
      1 => (hour, *pick(rng, &QUARTER_MINUTES)),
      2 => (shift_hour(rng, hour), *pick(rng, &QUARTER_MINUTES)),
      _ => (if hour == 12 { 1 } else { hour + 1 }, minute),
    };
    let wrong = format_time_text(wrong_hour, wrong_minute);
    if !options.contains(&wrong) {
      options.push(wrong);
    }
  }

  // walk the dial if sampling starved
  fill_distinct(&mut options, TEXT_OPTION_COUNT, |step| format_time_text(((hour + step - 1) % 12) + 1, minute));

  options.shuffle(rng);
  options
}

pub fn clock_reading<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let hour = random_int(rng, 1, 12);
  let minute = match difficulty {
    Difficulty::Easy => 0,
    Difficulty::Medium => *pick(rng, &QUARTER_MINUTES),
    Difficulty::Hard => random_int(rng, 0, 11) * 5,
  };
  let question = format!("[CLOCK:{hour}:{minute}] Đồng hồ chỉ mấy giờ?");
  let text_options = clock_text_options(rng, hour, minute);
  create_text_problem(
    ProblemType::ReviewClockReading,
    question,
    hour * 60 + minute,
    format_time_text(hour, minute),
    text_options,
  )
}

pub fn fraction_of_number<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (divisor, multiplier) = match difficulty {
    Difficulty::Easy => (2, random_int(rng, 2, 10)),
    Difficulty::Medium => (*pick(rng, &[2, 3, 4]), random_int(rng, 3, 12)),
    Difficulty::Hard => (*pick(rng, &[2, 3, 4, 5]), random_int(rng, 5, 20)),
  };
  let number = divisor * multiplier;
  let question = format!("Tìm 1/{divisor} của {number} là bao nhiêu?");
  create_problem(rng, ProblemType::ReviewFractionOfNumber, question, number / divisor)
}

pub fn written_calculation<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  if coin(rng) {
    let (a, b) = match difficulty {
      Difficulty::Easy => (random_int(rng, 10, 30), random_int(rng, 2, 5)),
      Difficulty::Medium => (random_int(rng, 100, 300), random_int(rng, 2, 6)),
      Difficulty::Hard => (random_int(rng, 200, 500), random_int(rng, 3, 9)),
    };
    let question = format!("Đặt tính rồi tính: {a} × {b} = ?");
    create_problem(rng, ProblemType::ReviewWrittenCalculation, question, a * b)
  } else {
    let (divisor, quotient) = match difficulty {
      Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 10, 30)),
      Difficulty::Medium => (random_int(rng, 2, 6), random_int(rng, 50, 150)),
      Difficulty::Hard => (random_int(rng, 3, 9), random_int(rng, 80, 200)),
    };
    let dividend = divisor * quotient;
    let question = format!("Đặt tính rồi tính: {dividend} : {divisor} = ?");
    create_problem(rng, ProblemType::ReviewWrittenCalculation, question, quotient)
  }
}

const POINT_LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

pub fn broken_line<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (segment_count, min, max, unit) = match difficulty {
    Difficulty::Easy => (2, 10, 30, "cm"),
    Difficulty::Medium => (3, 15, 50, "mm"),
    Difficulty::Hard => (4, 20, 60, "cm"),
  };
  let segments: Vec<i64> = (0..segment_count).map(|_| random_int(rng, min, max)).collect();

  let descriptions = segments
    .iter()
    .enumerate()
    .map(|(i, len)| format!("{}{} = {}{}", POINT_LABELS[i], POINT_LABELS[i + 1], len, unit))
    .collect::<Vec<_>>()
    .join(", ");
  let line_name = POINT_LABELS[..=segment_count].concat();
  let total: i64 = segments.iter().sum();

  let question = format!(
    "Đường gấp khúc {line_name} có {descriptions}. Tính độ dài đường gấp khúc {line_name} ({unit})."
  );
  create_problem(rng, ProblemType::ReviewBrokenLine, question, total)
}

fn chain_text_options<R: Rng + ?Sized>(
  rng: &mut R,
  middle: i64,
  end: i64,
  start: i64,
  multiply_by: i64,
  divide_by: i64,
) -> Vec<String> {
  let correct = format!("{middle}; {end}");
  let mut options = vec![correct.clone()];

  let more = start * (multiply_by + 1);
  let fewer = start * (multiply_by - 1);
  let off_by_one_divisor = match middle / (divide_by - 1) {
    0 => end + 2,
    v => v,
  };
  let plausible = [
    format!("{}; {}", more, more / divide_by),
    format!("{}; {}", fewer, fewer / divide_by),
    format!("{}; {}", middle, middle / (divide_by + 1)),
    format!("{}; {}", middle, off_by_one_divisor),
    format!("{}; {}", start + multiply_by, start + multiply_by - divide_by),
    format!("{}; {}", middle + start, end + 1),
  ];
  for wrong in plausible {
    if options.len() >= TEXT_OPTION_COUNT {
      break;
    }
    if !options.contains(&wrong) {
      options.push(wrong);
    }
  }

  let mut attempts = 0;
  while options.len() < TEXT_OPTION_COUNT && attempts < MAX_TEXT_OPTION_ATTEMPTS {
    attempts += 1;
    let wrong = format!("{}; {}", random_int(rng, 10, 100), random_int(rng, 1, 20));
    if !options.contains(&wrong) {
      options.push(wrong);
    }
  }
  fill_distinct(&mut options, TEXT_OPTION_COUNT, |step| format!("{}; {end}", middle + step));

  options.shuffle(rng);
  options
}

pub fn chain_calculation<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (start, multiply_by) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 6), random_int(rng, 2, 4)),
    Difficulty::Medium => (random_int(rng, 3, 8), random_int(rng, 3, 6)),
    Difficulty::Hard => (random_int(rng, 4, 10), random_int(rng, 4, 8)),
  };
  let middle = start * multiply_by;

  // multiply_by itself divides middle, so this is never empty
  let divisors: Vec<i64> = (2..=middle.min(10)).filter(|i| middle % i == 0).collect();
  let divide_by = divisors.choose(rng).copied().unwrap_or(multiply_by);
  let end = middle / divide_by;

  let question = format!("Điền số: {start} → (Gấp {multiply_by} lần) → ? → (Giảm {divide_by} lần) → ?");
  let text_options = chain_text_options(rng, middle, end, start, multiply_by, divide_by);
  create_text_problem(
    ProblemType::ReviewChainCalculation,
    question,
    middle,
    format!("{middle}; {end}"),
    text_options,
  )
}

#[derive(Clone, Copy)]
enum BlankOp {
  Multiplication,
  Division,
  Addition,
}

#[derive(Clone, Copy)]
enum BlankAt {
  First,
  Second,
  Result,
}

pub fn fill_blank<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let op = *pick(rng, &[BlankOp::Multiplication, BlankOp::Division, BlankOp::Addition]);
  let at = *pick(rng, &[BlankAt::First, BlankAt::Second, BlankAt::Result]);

  // (first operand, second operand, result, operator symbol)
  let (a, b, result, symbol) = match op {
    BlankOp::Multiplication => {
      let (a, b) = match difficulty {
        Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 2, 5)),
        Difficulty::Medium => (random_int(rng, 3, 9), random_int(rng, 3, 9)),
        Difficulty::Hard => (random_int(rng, 10, 50), random_int(rng, 2, 9)),
      };
      (a, b, a * b, "×")
    }
    BlankOp::Division => {
      let (b, result) = match difficulty {
        Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 2, 10)),
        Difficulty::Medium => (random_int(rng, 3, 9), random_int(rng, 5, 20)),
        Difficulty::Hard => (random_int(rng, 4, 9), random_int(rng, 10, 99)),
      };
      (b * result, b, result, ":")
    }
    BlankOp::Addition => {
      let (a, b) = match difficulty {
        Difficulty::Easy => (random_int(rng, 10, 50), random_int(rng, 10, 50)),
        Difficulty::Medium => (random_int(rng, 50, 200), random_int(rng, 50, 200)),
        Difficulty::Hard => (random_int(rng, 100, 500), random_int(rng, 100, 500)),
      };
      (a, b, a + b, "+")
    }
  };

  let (question, answer) = match at {
    BlankAt::First => (format!("? {symbol} {b} = {result}"), a),
    BlankAt::Second => (format!("{a} {symbol} ? = {result}"), b),
    BlankAt::Result => (format!("{a} {symbol} {b} = ?"), result),
  };
  create_problem(rng, ProblemType::ReviewFillBlank, question, answer)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionType;
  use crate::generator::dedup::extract_numbers;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  fn assert_distinct_with_answer(options: &[String], answer: &str) {
    assert_eq!(options.iter().filter(|o| o.as_str() == answer).count(), 1);
    let mut sorted = options.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), options.len());
  }

  #[test]
  fn clock_reading_encodes_time_and_text() {
    let mut rng = StdRng::seed_from_u64(41);
    for d in LEVELS {
      for _ in 0..100 {
        let p = clock_reading(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (h, m) = (n[0] as i64, n[1] as i64);
        assert!((1..=12).contains(&h));
        assert_eq!(m % 5, 0);
        if d == Difficulty::Easy {
          assert_eq!(m, 0);
        }
        assert_eq!(p.answer, h * 60 + m);
        assert_eq!(p.question_type, QuestionType::MultipleChoice);
        let text = p.text_answer.clone().expect("text answer");
        assert_eq!(text, format_time_text(h, m));
        let options = p.text_options.clone().expect("text options");
        assert_eq!(options.len(), 4);
        assert_distinct_with_answer(&options, &text);
      }
    }
  }

  #[test]
  fn time_text_format() {
    assert_eq!(format_time_text(3, 0), "3 giờ đúng");
    assert_eq!(format_time_text(11, 45), "11 giờ 45 phút");
  }

  #[test]
  fn fraction_of_number_is_exact() {
    let mut rng = StdRng::seed_from_u64(42);
    for d in LEVELS {
      for _ in 0..100 {
        let p = fraction_of_number(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (den, number) = (n[1], n[2]);
        assert_eq!(number % den, 0);
        assert_eq!(p.answer, (number / den) as i64);
      }
    }
  }

  #[test]
  fn written_calculation_is_consistent() {
    let mut rng = StdRng::seed_from_u64(43);
    for d in LEVELS {
      for _ in 0..100 {
        let p = written_calculation(&mut rng, d);
        let n = extract_numbers(&p.question);
        if p.question.contains('×') {
          assert_eq!(p.answer, (n[0] * n[1]) as i64);
        } else {
          assert_eq!(n[0] % n[1], 0);
          assert_eq!(p.answer, (n[0] / n[1]) as i64);
        }
      }
    }
  }

  #[test]
  fn broken_line_sums_segments() {
    let mut rng = StdRng::seed_from_u64(44);
    for (d, segments, name) in [(Difficulty::Easy, 2, "ABC"), (Difficulty::Medium, 3, "ABCD"), (Difficulty::Hard, 4, "ABCDE")] {
      let p = broken_line(&mut rng, d);
      let n = extract_numbers(&p.question);
      assert_eq!(n.len(), segments);
      assert_eq!(p.answer, n.iter().sum::<u64>() as i64);
      assert!(p.question.starts_with(&format!("Đường gấp khúc {name} có AB = ")));
    }
  }

  #[test]
  fn chain_calculation_text_answer() {
    let mut rng = StdRng::seed_from_u64(45);
    for d in LEVELS {
      for _ in 0..100 {
        let p = chain_calculation(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (start, mul, div) = (n[0] as i64, n[1] as i64, n[2] as i64);
        let middle = start * mul;
        assert_eq!(middle % div, 0, "{}", p.question);
        assert_eq!(p.answer, middle);
        let text = p.text_answer.clone().expect("text answer");
        assert_eq!(text, format!("{}; {}", middle, middle / div));
        let options = p.text_options.clone().expect("options");
        assert_eq!(options.len(), 4);
        assert_distinct_with_answer(&options, &text);
      }
    }
  }

  #[test]
  fn chain_options_stay_full_when_sampling_starves() {
    use crate::generator::options::StuckRng;
    for start in 2..=10 {
      for mul in 2..=8 {
        let middle = start * mul;
        for div in (2..=middle.min(10)).filter(|d| middle % d == 0) {
          let end = middle / div;
          let options = chain_text_options(&mut StuckRng, middle, end, start, mul, div);
          assert_eq!(options.len(), 4, "{start} {mul} {div}");
          assert_distinct_with_answer(&options, &format!("{middle}; {end}"));
        }
      }
    }
  }

  #[test]
  fn fill_blank_answer_completes_the_equation() {
    let mut rng = StdRng::seed_from_u64(46);
    for d in LEVELS {
      for _ in 0..300 {
        let p = fill_blank(&mut rng, d);
        let filled = p.question.replacen('?', &p.answer.to_string(), 1);
        let n = extract_numbers(&filled);
        let (a, b, r) = (n[0], n[1], n[2]);
        if filled.contains('×') {
          assert_eq!(a * b, r, "{}", p.question);
        } else if filled.contains(':') {
          assert_eq!(a, b * r, "{}", p.question);
        } else {
          assert_eq!(a + b, r, "{}", p.question);
        }
      }
    }
  }
}
