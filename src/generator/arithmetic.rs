//! Basic arithmetic: addition, subtraction, multiplication and exact division.

use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{create_problem, random_int};

pub fn addition<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (a, b) = match difficulty {
    Difficulty::Easy => (random_int(rng, 1, 50), random_int(rng, 1, 50)),
    Difficulty::Medium => (random_int(rng, 10, 200), random_int(rng, 10, 200)),
    Difficulty::Hard => (random_int(rng, 100, 500), random_int(rng, 100, 500)),
  };
  create_problem(rng, ProblemType::Addition, format!("{a} + {b} = ?"), a + b)
}

pub fn subtraction<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  // The subtrahend is always drawn below the minuend.
  let (a, b) = match difficulty {
    Difficulty::Easy => {
      let a = random_int(rng, 10, 50);
      (a, random_int(rng, 1, a - 1))
    }
    Difficulty::Medium => {
      let a = random_int(rng, 50, 200);
      (a, random_int(rng, 10, a - 10))
    }
    Difficulty::Hard => {
      let a = random_int(rng, 200, 800);
      (a, random_int(rng, 50, a - 50))
    }
  };
  create_problem(rng, ProblemType::Subtraction, format!("{a} - {b} = ?"), a - b)
}

fn small_factor_span(difficulty: Difficulty) -> (i64, i64) {
  match difficulty {
    Difficulty::Easy => (2, 5),
    Difficulty::Medium => (3, 8),
    Difficulty::Hard => (6, 10),
  }
}

pub fn multiplication<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (lo, hi) = small_factor_span(difficulty);
  let a = random_int(rng, lo, hi);
  let b = random_int(rng, lo, hi);
  create_problem(rng, ProblemType::Multiplication, format!("{a} × {b} = ?"), a * b)
}

pub fn division<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (lo, hi) = small_factor_span(difficulty);
  let divisor = random_int(rng, lo, hi);
  let quotient = random_int(rng, lo, hi);
  let dividend = divisor * quotient;
  create_problem(rng, ProblemType::Division, format!("{dividend} : {divisor} = ?"), quotient)
}
