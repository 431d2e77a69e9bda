//! Built-in catalog of selectable problem types: Vietnamese labels,
//! descriptions and the setup-screen grouping.

use serde::Serialize;

use crate::domain::ProblemType;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProblemGroup {
  Basic,
  Advanced,
  WordProblem,
  Geometry,
  Other,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Grade3,
  Review,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
  #[serde(rename = "type")]
  pub kind: ProblemType,
  pub label: &'static str,
  pub description: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group: Option<ProblemGroup>,
  pub category: Category,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GroupInfo {
  pub group: ProblemGroup,
  pub label: &'static str,
  pub icon: &'static str,
}

/// Short label used in results breakdowns. Covers every type, including the
/// ones only reachable through the semester-1 review.
pub fn label(kind: ProblemType) -> &'static str {
  match kind {
    ProblemType::Addition => "Phép cộng",
    ProblemType::Subtraction => "Phép trừ",
    ProblemType::Multiplication => "Phép nhân",
    ProblemType::Division => "Phép chia",
    ProblemType::MultiplicationTable => "Bảng nhân",
    ProblemType::DivisionTable => "Bảng chia",
    ProblemType::TwoDigitMultiply => "Nhân 2 chữ số",
    ProblemType::DivisionWithRemainder => "Chia có dư",
    ProblemType::TwoDigitDivide => "Chia 2 chữ số",
    ProblemType::ThreeDigitMultiply => "Nhân 3 chữ số",
    ProblemType::ThreeDigitDivide => "Chia 3 chữ số",
    ProblemType::WordProblemMoreLess => "Toán có lời văn: Hơn kém",
    ProblemType::WordProblemMultiplyDivide => "Toán có lời văn: Gấp/Giảm",
    ProblemType::WordProblemUnitConversion => "Toán có lời văn: Rút đơn vị",
    ProblemType::WordProblemDivisionRemainder => "Toán có lời văn: Chia có dư",
    ProblemType::GeometryMidpoint => "Hình học: Trung điểm",
    ProblemType::GeometryCircle => "Hình học: Hình tròn",
    ProblemType::GeometryRectangle => "Hình học: Hình chữ nhật",
    ProblemType::GeometrySquare => "Hình học: Hình vuông",
    ProblemType::ReviewClockReading => "Xem đồng hồ",
    ProblemType::ReviewFractionOfNumber => "Tìm 1/n của số",
    ProblemType::ReviewWrittenCalculation => "Đặt tính rồi tính",
    ProblemType::ReviewBrokenLine => "Đường gấp khúc",
    ProblemType::ReviewChainCalculation => "Điền số vào ô trống",
    ProblemType::ReviewFillBlank => "Tìm số còn thiếu",
    ProblemType::VisualFraction => "Khoanh phân số",
    ProblemType::TrueFalseMultiplyDivide => "Đúng/Sai: Gấp/Giảm",
    ProblemType::UnitCalculation => "Tính có đơn vị",
    ProblemType::ReviewSemester1 => "Ôn tập: Học kỳ 1",
  }
}

fn grade3(kind: ProblemType, label: &'static str, description: &'static str, group: ProblemGroup) -> CatalogEntry {
  CatalogEntry { kind, label, description, group: Some(group), category: Category::Grade3 }
}

/// Setup-screen entries in display order.
pub fn catalog() -> Vec<CatalogEntry> {
  use ProblemGroup::*;
  use ProblemType as T;
  vec![
    grade3(T::Addition, "Phép cộng", "Cộng trong phạm vi 1000", Basic),
    grade3(T::Subtraction, "Phép trừ", "Trừ trong phạm vi 1000", Basic),
    grade3(T::MultiplicationTable, "Bảng nhân", "Nhân từ 1 đến 9", Basic),
    grade3(T::DivisionTable, "Bảng chia", "Chia từ 1 đến 9", Basic),
    grade3(T::Multiplication, "Phép nhân", "Nhân trong phạm vi 100", Basic),
    grade3(T::Division, "Phép chia", "Chia trong phạm vi 100", Basic),
    grade3(T::TwoDigitMultiply, "Nhân 2 chữ số", "Nhân số có hai chữ số với số có một chữ số", Advanced),
    grade3(T::TwoDigitDivide, "Chia 2 chữ số", "Chia số có hai chữ số cho số có một chữ số", Advanced),
    grade3(T::ThreeDigitMultiply, "Nhân 3 chữ số", "Nhân số có ba chữ số với số có một chữ số", Advanced),
    grade3(T::ThreeDigitDivide, "Chia 3 chữ số", "Chia số có ba chữ số cho số có một chữ số", Advanced),
    grade3(T::DivisionWithRemainder, "Chia có dư", "Phép chia hết, phép chia có dư", Advanced),
    grade3(T::WordProblemMoreLess, "Hơn kém", "Dạng toán về hơn kém số đơn vị", WordProblem),
    grade3(T::WordProblemMultiplyDivide, "Gấp/Giảm", "Dạng toán về gấp số lần, giảm số lần", WordProblem),
    grade3(T::WordProblemUnitConversion, "Rút đơn vị", "Dạng toán liên quan đến rút về đơn vị", WordProblem),
    grade3(T::WordProblemDivisionRemainder, "Chia có dư", "Bài toán tìm số lượng nhiều nhất", WordProblem),
    grade3(T::GeometryMidpoint, "Trung điểm", "Điểm ở giữa - Trung điểm của đoạn thẳng", Geometry),
    grade3(T::GeometryCircle, "Hình tròn", "Hình tròn: tâm, bán kính, đường kính", Geometry),
    grade3(T::GeometryRectangle, "Hình chữ nhật", "Hình chữ nhật, chu vi, diện tích", Geometry),
    grade3(T::GeometrySquare, "Hình vuông", "Hình vuông, chu vi, diện tích", Geometry),
    grade3(T::ReviewClockReading, "Xem đồng hồ", "Đọc giờ trên đồng hồ kim", Other),
    grade3(T::ReviewFractionOfNumber, "Tìm 1/n của số", "Tìm 1/2, 1/3, 1/4, 1/5 của một số", Other),
    grade3(T::ReviewWrittenCalculation, "Đặt tính rồi tính", "Phép tính nhiều chữ số", Other),
    grade3(T::ReviewBrokenLine, "Đường gấp khúc", "Tính tổng độ dài các đoạn thẳng", Other),
    grade3(T::ReviewChainCalculation, "Điền số vào ô trống", "Gấp/Giảm số lần theo dãy", Other),
    grade3(T::ReviewFillBlank, "Tìm số còn thiếu", "Tìm ẩn số trong phép tính: ? × 6 = 48", Other),
    CatalogEntry {
      kind: T::ReviewSemester1,
      label: "Ôn tập Học kỳ 1",
      description: "Tổng hợp các dạng bài tập",
      group: None,
      category: Category::Review,
    },
  ]
}

pub fn groups() -> Vec<GroupInfo> {
  vec![
    GroupInfo { group: ProblemGroup::Basic, label: "Phép tính cơ bản", icon: "🔢" },
    GroupInfo { group: ProblemGroup::Advanced, label: "Phép tính nâng cao", icon: "📊" },
    GroupInfo { group: ProblemGroup::WordProblem, label: "Toán có lời văn", icon: "📝" },
    GroupInfo { group: ProblemGroup::Geometry, label: "Hình học", icon: "📐" },
    GroupInfo { group: ProblemGroup::Other, label: "Các dạng bài khác", icon: "📋" },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn catalog_lists_each_selectable_type_once() {
    let entries = catalog();
    assert_eq!(entries.len(), 26);
    let kinds: HashSet<ProblemType> = entries.iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), 26);
    for hidden in [ProblemType::VisualFraction, ProblemType::TrueFalseMultiplyDivide, ProblemType::UnitCalculation] {
      assert!(!kinds.contains(&hidden));
    }
  }

  #[test]
  fn only_the_umbrella_is_in_review_category() {
    let review: Vec<_> = catalog().into_iter().filter(|e| e.category == Category::Review).collect();
    assert_eq!(review.len(), 1);
    assert_eq!(review[0].kind, ProblemType::ReviewSemester1);
    assert!(review[0].group.is_none());
  }

  #[test]
  fn every_grouped_entry_has_a_group_label() {
    let known: HashSet<ProblemGroup> = groups().iter().map(|g| g.group).collect();
    for group in catalog().iter().filter_map(|e| e.group) {
      assert!(known.contains(&group));
    }
  }

  #[test]
  fn entry_serializes_with_type_tag() {
    let json = serde_json::to_value(&catalog()[0]).unwrap();
    assert_eq!(json["type"], "addition");
    assert_eq!(json["group"], "basic");
    assert_eq!(json["category"], "grade3");
  }
}
