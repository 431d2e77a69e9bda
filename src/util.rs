//! Small utility helpers used across modules.

use chrono::Utc;

/// Wall clock in epoch milliseconds (session `startTime`).
pub fn now_millis() -> i64 {
  Utc::now().timestamp_millis()
}

/// Log-safe truncation for large strings; cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_are_untouched() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
  }

  #[test]
  fn truncation_respects_utf8() {
    // "Đ" is two bytes; cutting at 1 must back off to 0
    let out = trunc_for_log("Đúng", 1);
    assert!(out.starts_with("… ("));
    assert!(out.ends_with("bytes total)"));
  }

  #[test]
  fn clock_is_after_2020() {
    assert!(now_millis() > 1_577_836_800_000);
  }
}
