//! Times tables (bảng nhân / bảng chia), driven by the shared table range.

use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{create_problem, random_int, range_for};

pub fn multiplication_table<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let span = range_for(difficulty);
  let a = random_int(rng, span.min, span.max);
  let b = random_int(rng, span.min, span.max);
  create_problem(rng, ProblemType::MultiplicationTable, format!("{a} × {b} = ?"), a * b)
}

pub fn division_table<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let span = range_for(difficulty);
  let divisor = random_int(rng, span.min, span.max);
  let quotient = random_int(rng, span.min, span.max);
  let product = divisor * quotient;
  create_problem(rng, ProblemType::DivisionTable, format!("{product} : {divisor} = ?"), quotient)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::dedup::extract_numbers;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn table_operands_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
      let span = range_for(d);
      for _ in 0..100 {
        let p = multiplication_table(&mut rng, d);
        let n = extract_numbers(&p.question);
        assert!(n.iter().all(|v| (*v as i64) >= span.min && (*v as i64) <= span.max));
        assert_eq!(p.answer, (n[0] * n[1]) as i64);

        let p = division_table(&mut rng, d);
        let n = extract_numbers(&p.question);
        assert_eq!(n[0] % n[1], 0);
        assert_eq!(p.answer, (n[0] / n[1]) as i64);
      }
    }
  }
}
