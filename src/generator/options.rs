//! Multiple-choice distractors for numeric answers.

use rand::seq::SliceRandom;
use rand::Rng;

/// Rejection-sampling budget before the deterministic fill takes over.
pub const MAX_OPTION_ATTEMPTS: usize = 1000;

const OPTION_COUNT: usize = 4;

/// Four distinct non-negative integers including `correct`, shuffled.
///
/// Candidates are near misses (`correct ± 3`) or uniform draws from `[0, 100]`.
/// If sampling starves, the remaining slots take the smallest unused values
/// above the near-miss window.
pub fn build_options<R: Rng + ?Sized>(rng: &mut R, correct: i64) -> Vec<i64> {
  let mut options = vec![correct];
  let mut attempts = 0;

  while options.len() < OPTION_COUNT && attempts < MAX_OPTION_ATTEMPTS {
    attempts += 1;
    let candidate = if rng.gen_bool(0.5) {
      correct + rng.gen_range(-3..=3)
    } else {
      rng.gen_range(0..=100)
    };
    if candidate >= 0 && !options.contains(&candidate) {
      options.push(candidate);
    }
  }

  let base = correct.max(0) + 3;
  fill_distinct(&mut options, OPTION_COUNT, |step| base + step);

  options.shuffle(rng);
  options
}

/// Tops `options` up to `count` with `candidate(1)`, `candidate(2)`, ...,
/// skipping values already present. `candidate` must not repeat itself
/// before `count` distinct values are reached.
pub fn fill_distinct<T: PartialEq>(options: &mut Vec<T>, count: usize, mut candidate: impl FnMut(i64) -> T) {
  let mut step = 1;
  while options.len() < count {
    let next = candidate(step);
    if !options.contains(&next) {
      options.push(next);
    }
    step += 1;
  }
}

/// An RNG that only ever yields zero, for starving rejection loops.
#[cfg(test)]
pub(crate) struct StuckRng;

#[cfg(test)]
impl rand::RngCore for StuckRng {
  fn next_u32(&mut self) -> u32 {
    0
  }
  fn next_u64(&mut self) -> u64 {
    0
  }
  fn fill_bytes(&mut self, dest: &mut [u8]) {
    dest.fill(0)
  }
  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
    dest.fill(0);
    Ok(())
  }
}
