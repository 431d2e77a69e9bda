//! Multi-digit multiply/divide and division with remainder.
//!
//! Divisions are built from divisor and quotient, so the dividend is exact
//! (or exact plus a remainder in `[1, divisor - 1]`).

use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{create_problem, random_int};

pub fn two_digit_multiply<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (two_digit, one_digit) = match difficulty {
    Difficulty::Easy => (random_int(rng, 10, 25), random_int(rng, 2, 5)),
    Difficulty::Medium => (random_int(rng, 15, 50), random_int(rng, 3, 8)),
    Difficulty::Hard => (random_int(rng, 20, 99), random_int(rng, 4, 9)),
  };
  create_problem(
    rng,
    ProblemType::TwoDigitMultiply,
    format!("{two_digit} × {one_digit} = ?"),
    two_digit * one_digit,
  )
}

pub fn two_digit_divide<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (divisor, quotient) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 3, 12)),
    Difficulty::Medium => (random_int(rng, 3, 7), random_int(rng, 5, 20)),
    Difficulty::Hard => (random_int(rng, 4, 9), random_int(rng, 8, 25)),
  };
  let dividend = divisor * quotient;
  create_problem(rng, ProblemType::TwoDigitDivide, format!("{dividend} : {divisor} = ?"), quotient)
}

pub fn three_digit_multiply<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (three_digit, one_digit) = match difficulty {
    Difficulty::Easy => (random_int(rng, 100, 200), random_int(rng, 2, 5)),
    Difficulty::Medium => (random_int(rng, 150, 400), random_int(rng, 3, 7)),
    Difficulty::Hard => (random_int(rng, 200, 999), random_int(rng, 4, 9)),
  };
  create_problem(
    rng,
    ProblemType::ThreeDigitMultiply,
    format!("{three_digit} × {one_digit} = ?"),
    three_digit * one_digit,
  )
}

pub fn three_digit_divide<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (divisor, quotient) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 20, 50)),
    Difficulty::Medium => (random_int(rng, 3, 7), random_int(rng, 30, 100)),
    Difficulty::Hard => (random_int(rng, 4, 9), random_int(rng, 50, 200)),
  };
  let dividend = divisor * quotient;
  create_problem(rng, ProblemType::ThreeDigitDivide, format!("{dividend} : {divisor} = ?"), quotient)
}

pub fn division_with_remainder<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (divisor, quotient) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 3, 8)),
    Difficulty::Medium => (random_int(rng, 3, 7), random_int(rng, 5, 15)),
    Difficulty::Hard => (random_int(rng, 4, 9), random_int(rng, 8, 25)),
  };
  let remainder = random_int(rng, 1, divisor - 1);
  let dividend = divisor * quotient + remainder;
  create_problem(
    rng,
    ProblemType::DivisionWithRemainder,
    format!("{dividend} : {divisor} = ? (dư {remainder})"),
    quotient,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::dedup::extract_numbers;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  #[test]
  fn multi_digit_products_are_correct() {
    let mut rng = StdRng::seed_from_u64(4);
    for d in LEVELS {
      for _ in 0..100 {
        for p in [two_digit_multiply(&mut rng, d), three_digit_multiply(&mut rng, d)] {
          let n = extract_numbers(&p.question);
          assert_eq!(p.answer, (n[0] * n[1]) as i64, "{}", p.question);
          assert!(n[1] < 10);
        }
      }
    }
  }

  #[test]
  fn multi_digit_divisions_are_exact() {
    let mut rng = StdRng::seed_from_u64(5);
    for d in LEVELS {
      for _ in 0..100 {
        for p in [two_digit_divide(&mut rng, d), three_digit_divide(&mut rng, d)] {
          let n = extract_numbers(&p.question);
          assert_eq!(n[0] % n[1], 0, "{}", p.question);
          assert_eq!(p.answer, (n[0] / n[1]) as i64);
        }
      }
    }
  }

  #[test]
  fn remainder_is_strictly_inside_divisor() {
    let mut rng = StdRng::seed_from_u64(6);
    for d in LEVELS {
      for _ in 0..200 {
        let p = division_with_remainder(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (dividend, divisor, remainder) = (n[0], n[1], n[2]);
        assert!(remainder > 0 && remainder < divisor, "{}", p.question);
        assert_eq!(dividend, divisor * p.answer as u64 + remainder);
      }
    }
  }

  #[test]
  fn product_question_format() {
    let mut rng = StdRng::seed_from_u64(7);
    let p = three_digit_multiply(&mut rng, Difficulty::Hard);
    let n = extract_numbers(&p.question);
    assert_eq!(p.question, format!("{} × {} = ?", n[0], n[1]));
  }
}
