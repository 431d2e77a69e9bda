//! Geometry: segment midpoint, circle radius/diameter, rectangle and square
//! perimeter/area. Which quantity is asked is a coin flip.

use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{coin, create_problem, random_int};

pub fn midpoint<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let length = match difficulty {
    Difficulty::Easy => random_int(rng, 4, 20),
    Difficulty::Medium => random_int(rng, 10, 40),
    Difficulty::Hard => random_int(rng, 20, 80),
  };
  let question = format!(
    "Đoạn thẳng AB dài {length}cm. Điểm M là trung điểm của AB. Hỏi AM dài bao nhiêu cm?"
  );
  create_problem(rng, ProblemType::GeometryMidpoint, question, length / 2)
}

pub fn circle<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let radius_to_diameter = coin(rng);
  let radius = match difficulty {
    Difficulty::Easy => random_int(rng, 2, 10),
    Difficulty::Medium => random_int(rng, 5, 20),
    Difficulty::Hard => random_int(rng, 10, 40),
  };
  if radius_to_diameter {
    let question = format!("Hình tròn có bán kính {radius}cm. Hỏi đường kính của hình tròn là bao nhiêu cm?");
    create_problem(rng, ProblemType::GeometryCircle, question, radius * 2)
  } else {
    let diameter = radius * 2;
    let question = format!("Hình tròn có đường kính {diameter}cm. Hỏi bán kính của hình tròn là bao nhiêu cm?");
    create_problem(rng, ProblemType::GeometryCircle, question, radius)
  }
}

pub fn rectangle<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let is_perimeter = coin(rng);
  let (length, width) = match difficulty {
    Difficulty::Easy => (random_int(rng, 3, 10), random_int(rng, 2, 8)),
    Difficulty::Medium => (random_int(rng, 5, 20), random_int(rng, 4, 15)),
    Difficulty::Hard => (random_int(rng, 10, 40), random_int(rng, 8, 30)),
  };
  if is_perimeter {
    let question = format!(
      "Hình chữ nhật có chiều dài {length}cm, chiều rộng {width}cm. Hỏi chu vi hình chữ nhật là bao nhiêu cm?"
    );
    create_problem(rng, ProblemType::GeometryRectangle, question, 2 * (length + width))
  } else {
    let question = format!(
      "Hình chữ nhật có chiều dài {length}cm, chiều rộng {width}cm. Hỏi diện tích hình chữ nhật là bao nhiêu cm²?"
    );
    create_problem(rng, ProblemType::GeometryRectangle, question, length * width)
  }
}

pub fn square<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let is_perimeter = coin(rng);
  let side = match difficulty {
    Difficulty::Easy => random_int(rng, 3, 10),
    Difficulty::Medium => random_int(rng, 5, 20),
    Difficulty::Hard => random_int(rng, 10, 40),
  };
  square_problem(rng, side, is_perimeter)
}

fn square_problem<R: Rng + ?Sized>(rng: &mut R, side: i64, is_perimeter: bool) -> Problem {
  if is_perimeter {
    let question = format!("Hình vuông có cạnh {side}cm. Hỏi chu vi hình vuông là bao nhiêu cm?");
    create_problem(rng, ProblemType::GeometrySquare, question, 4 * side)
  } else {
    let question = format!("Hình vuông có cạnh {side}cm. Hỏi diện tích hình vuông là bao nhiêu cm²?");
    create_problem(rng, ProblemType::GeometrySquare, question, side * side)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::dedup::extract_numbers;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  #[test]
  fn square_area_example() {
    let mut rng = StdRng::seed_from_u64(0);
    let p = square_problem(&mut rng, 6, false);
    assert_eq!(p.question, "Hình vuông có cạnh 6cm. Hỏi diện tích hình vuông là bao nhiêu cm²?");
    assert_eq!(p.answer, 36);
  }

  #[test]
  fn closed_forms_hold() {
    let mut rng = StdRng::seed_from_u64(31);
    for d in LEVELS {
      for _ in 0..100 {
        let p = midpoint(&mut rng, d);
        assert_eq!(p.answer, extract_numbers(&p.question)[0] as i64 / 2);

        let p = circle(&mut rng, d);
        let v = extract_numbers(&p.question)[0] as i64;
        if p.question.contains("có bán kính") {
          assert_eq!(p.answer, v * 2);
        } else {
          assert_eq!(p.answer * 2, v);
        }

        let p = rectangle(&mut rng, d);
        let n = extract_numbers(&p.question);
        let (l, w) = (n[0] as i64, n[1] as i64);
        if p.question.contains("chu vi") {
          assert_eq!(p.answer, 2 * (l + w));
        } else {
          assert_eq!(p.answer, l * w);
        }

        let p = square(&mut rng, d);
        let s = extract_numbers(&p.question)[0] as i64;
        if p.question.contains("chu vi") {
          assert_eq!(p.answer, 4 * s);
        } else {
          assert_eq!(p.answer, s * s);
        }
      }
    }
  }
}
