//! Word problems (toán có lời văn). The narrative template and the numbers are
//! drawn independently; the answer is always the arithmetic result.

use rand::Rng;

use crate::domain::{Difficulty, Problem, ProblemType};
use crate::generator::helpers::{coin, create_problem, pick, random_int};

const NAMES: &[&str] = &["An", "Bình", "Mai", "Hoa", "Nam", "Lan", "Hùng", "Hương"];

const MORE_LESS_OBJECTS: &[&str] = &[
  "quả táo", "viên bi", "cái kẹo", "quyển vở", "cái bút", "quả cam", "cái bánh", "quyển sách",
];

const MULTIPLY_OBJECTS: &[&str] = &[
  "cái bút", "quả cam", "cái bánh", "quyển vở", "viên bi", "cái kẹo", "quyển sách", "cái bút chì",
];
const MULTIPLY_CONTAINERS: &[&str] = &["hộp", "túi", "đĩa", "rổ", "thùng", "giỏ", "hộp", "túi"];

const UNIT_OBJECTS: &[&str] = &[
  "quả cam", "cái bút", "quyển vở", "viên bi", "cái kẹo", "quả táo", "cái bánh", "quyển sách",
];
const UNIT_CONTAINERS: &[&str] = &["túi", "hộp", "đĩa", "rổ", "thùng", "giỏ"];

/// "At most how many groups" narrative for division with remainder.
struct RemainderTemplate {
  subject: &'static str,
  action: &'static str,
  material: &'static str,
  unit: &'static str,
  item_name: &'static str,
  ask: &'static str,
}

const REMAINDER_TEMPLATES: &[RemainderTemplate] = &[
  RemainderTemplate {
    subject: "Người thợ may",
    action: "dùng",
    material: "vải",
    unit: "m",
    item_name: "bộ quần áo công nhân",
    ask: "may được nhiều nhất bao nhiêu bộ quần áo",
  },
  RemainderTemplate {
    subject: "Cửa hàng",
    action: "có",
    material: "kẹo",
    unit: "cái",
    item_name: "túi kẹo",
    ask: "đóng được nhiều nhất bao nhiêu túi",
  },
  RemainderTemplate {
    subject: "Nhà trường",
    action: "có",
    material: "học sinh",
    unit: "học sinh",
    item_name: "đội",
    ask: "chia được nhiều nhất bao nhiêu đội",
  },
  RemainderTemplate {
    subject: "Bác nông dân",
    action: "thu hoạch được",
    material: "cam",
    unit: "kg",
    item_name: "thùng cam",
    ask: "đóng được nhiều nhất bao nhiêu thùng",
  },
];

/// Two distinct student names.
fn two_names<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
  let first = *pick(rng, NAMES);
  let mut second = *pick(rng, NAMES);
  while second == first {
    second = *pick(rng, NAMES);
  }
  (first, second)
}

pub fn more_less<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let is_more = coin(rng);
  let (base, diff_min, diff_max) = match difficulty {
    Difficulty::Easy => (random_int(rng, 5, 20), 2, 8),
    Difficulty::Medium => (random_int(rng, 10, 50), 5, 15),
    Difficulty::Hard => (random_int(rng, 20, 100), 10, 30),
  };
  // "fewer" must leave a positive amount
  let diff = if is_more {
    random_int(rng, diff_min, diff_max)
  } else {
    random_int(rng, diff_min, diff_max.min(base - 1))
  };
  let answer = if is_more { base + diff } else { base - diff };

  let (name1, name2) = two_names(rng);
  let object = *pick(rng, MORE_LESS_OBJECTS);
  let relation = if is_more { "nhiều hơn" } else { "ít hơn" };
  let question = format!(
    "{name1} có {base} {object}. {name2} có {relation} {name1} {diff} {object}. Hỏi {name2} có bao nhiêu {object}?"
  );
  create_problem(rng, ProblemType::WordProblemMoreLess, question, answer)
}

pub fn multiply_divide<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let is_multiply = coin(rng);
  let (base, multiplier) = match difficulty {
    Difficulty::Easy => (random_int(rng, 3, 10), random_int(rng, 2, 5)),
    Difficulty::Medium => (random_int(rng, 5, 15), random_int(rng, 3, 8)),
    Difficulty::Hard => (random_int(rng, 8, 20), random_int(rng, 4, 10)),
  };
  let object = *pick(rng, MULTIPLY_OBJECTS);
  let container = *pick(rng, MULTIPLY_CONTAINERS);

  if is_multiply {
    let question = format!(
      "Một {container} có {base} {object}. Hỏi {multiplier} {container} như thế có bao nhiêu {object}?"
    );
    create_problem(rng, ProblemType::WordProblemMultiplyDivide, question, base * multiplier)
  } else {
    let total = base * multiplier;
    let question = format!(
      "Có {total} {object} chia đều vào {multiplier} {container}. Hỏi mỗi {container} có bao nhiêu {object}?"
    );
    create_problem(rng, ProblemType::WordProblemMultiplyDivide, question, base)
  }
}

pub fn unit_conversion<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (containers, per_container) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 5), random_int(rng, 3, 10)),
    Difficulty::Medium => (random_int(rng, 3, 8), random_int(rng, 5, 15)),
    Difficulty::Hard => (random_int(rng, 4, 10), random_int(rng, 8, 20)),
  };
  let total = containers * per_container;
  let object = *pick(rng, UNIT_OBJECTS);
  let container = *pick(rng, UNIT_CONTAINERS);
  let question = format!(
    "Một cửa hàng có {total} {object}, chia đều vào {containers} {container}. Hỏi mỗi {container} có bao nhiêu {object}?"
  );
  create_problem(rng, ProblemType::WordProblemUnitConversion, question, per_container)
}

pub fn division_remainder<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Problem {
  let (divisor, quotient) = match difficulty {
    Difficulty::Easy => (random_int(rng, 2, 4), random_int(rng, 10, 20)),
    Difficulty::Medium => (random_int(rng, 3, 6), random_int(rng, 15, 30)),
    Difficulty::Hard => (random_int(rng, 4, 9), random_int(rng, 20, 50)),
  };
  let remainder = random_int(rng, 1, divisor - 1);
  let dividend = divisor * quotient + remainder;

  let t = pick(rng, REMAINDER_TEMPLATES);
  let question = format!(
    "{} {} {} {} {}. Mỗi {} cần {} {}. Hỏi {}?",
    t.subject, t.action, dividend, t.unit, t.material, t.item_name, divisor, t.unit, t.ask
  );
  create_problem(rng, ProblemType::WordProblemDivisionRemainder, question, quotient)
}
