//! Side-by-side views of results: category rows per taxonomy group, macro axes
//! against their capacity, and per-question drill-down for one category.

use serde::Serialize;

use crate::category::CategoryId;
use crate::domain::{AnswerValue, AssessmentResult, Catalogue, CategoryGroup};
use crate::scoring::{macro_capacity, MacroAxis};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
  pub left: Participant,
  pub right: Option<Participant>,
  pub sections: Vec<Section>,
  pub social: Vec<AxisRow>,
  pub emotional: Vec<AxisRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Participant {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Section {
  pub group: CategoryGroup,
  pub rows: Vec<CategoryRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryRow {
  pub id: CategoryId,
  pub name: String,
  pub left: u32,
  pub right: Option<u32>,
  /// Absolute difference; 0 without a right-hand side.
  pub diff: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisRow {
  pub axis: MacroAxis,
  pub capacity: u32,
  pub left: u32,
  pub left_pct: f64,
  pub right: Option<u32>,
  pub right_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryDetail {
  pub id: CategoryId,
  pub name: String,
  pub left_total: u32,
  pub right_total: Option<u32>,
  pub questions: Vec<QuestionRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionRow {
  pub id: u32,
  pub category_code: String,
  pub text: String,
  pub left: Option<AnswerValue>,
  pub left_low: bool,
  pub right: Option<AnswerValue>,
  pub right_low: bool,
}

fn participant(result: &AssessmentResult) -> Participant {
  Participant { id: result.id.clone(), name: result.name.clone() }
}

fn pct(value: u32, capacity: u32) -> f64 {
  if capacity == 0 {
    0.0
  } else {
    f64::from(value) / f64::from(capacity) * 100.0
  }
}

fn axis_rows(
  catalogue: &Catalogue,
  axes: [MacroAxis; 3],
  left: &AssessmentResult,
  right: Option<&AssessmentResult>,
) -> Vec<AxisRow> {
  axes
    .into_iter()
    .map(|axis| {
      let capacity = macro_capacity(&catalogue.questions, axis);
      let l = axis.read(&left.macro_profile);
      let r = right.map(|r| axis.read(&r.macro_profile));
      AxisRow {
        axis,
        capacity,
        left: l,
        left_pct: pct(l, capacity),
        right: r,
        right_pct: r.map(|r| pct(r, capacity)),
      }
    })
    .collect()
}

/// Profile of `left`, optionally against `right`. Works on stored scores only.
pub fn compare(catalogue: &Catalogue, left: &AssessmentResult, right: Option<&AssessmentResult>) -> Comparison {
  let sections = CategoryGroup::ALL
    .into_iter()
    .map(|group| Section {
      group,
      rows: catalogue
        .categories_in(group)
        .map(|cat| {
          let l = left.scores.get(cat.id);
          let r = right.map(|r| r.scores.get(cat.id));
          CategoryRow {
            id: cat.id,
            name: cat.name.clone(),
            left: l,
            right: r,
            diff: r.map(|r| l.abs_diff(r)).unwrap_or(0),
          }
        })
        .collect(),
    })
    .collect();

  Comparison {
    left: participant(left),
    right: right.map(participant),
    sections,
    social: axis_rows(catalogue, MacroAxis::SOCIAL, left, right),
    emotional: axis_rows(catalogue, MacroAxis::EMOTIONAL, left, right),
  }
}

/// Every catalogue question feeding `category`, with both respondents' answers.
pub fn category_detail(
  catalogue: &Catalogue,
  category: CategoryId,
  left: &AssessmentResult,
  right: Option<&AssessmentResult>,
) -> CategoryDetail {
  let name = catalogue
    .category(category)
    .map(|c| c.name.clone())
    .unwrap_or_else(|| category.to_string());

  let questions = catalogue
    .questions_in(category)
    .map(|q| {
      let l = left.answers.get(q.id);
      let r = right.and_then(|r| r.answers.get(q.id));
      QuestionRow {
        id: q.id,
        category_code: q.category_code.clone(),
        text: q.text.clone(),
        left: l,
        left_low: l.is_some_and(AnswerValue::is_low),
        right: r,
        right_low: r.is_some_and(AnswerValue::is_low),
      }
    })
    .collect();

  CategoryDetail {
    id: category,
    name,
    left_total: left.scores.get(category),
    right_total: right.map(|r| r.scores.get(category)),
    questions,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::AnswerSet;
  use crate::seeds::seed_catalogue;

  fn result(catalogue: &Catalogue, name: &str, pairs: &[(u32, u8)]) -> AssessmentResult {
    let answers: AnswerSet = pairs.iter().map(|(q, v)| (*q, AnswerValue::clamped(i64::from(*v)))).collect();
    AssessmentResult::new(name, answers, &catalogue.questions)
  }

  #[test]
  fn single_profile_has_no_right_side() {
    let catalogue = seed_catalogue();
    let ada = result(&catalogue, "Ada", &[(1, 4), (2, 2)]);
    let view = compare(&catalogue, &ada, None);

    assert!(view.right.is_none());
    assert_eq!(view.sections.len(), 4);
    let first = &view.sections[0].rows[0];
    assert_eq!((first.id.as_str(), first.left, first.right, first.diff), ("1", 6, None, 0));

    let active = &view.social[0];
    assert_eq!(active.axis, MacroAxis::Active);
    assert_eq!(active.capacity, 44);
    assert_eq!(active.left, 4);
    assert!((active.left_pct - 4.0 / 44.0 * 100.0).abs() < 1e-9);
    assert!(active.right_pct.is_none());
  }

  #[test]
  fn two_profiles_report_absolute_differences() {
    let catalogue = seed_catalogue();
    let ada = result(&catalogue, "Ada", &[(1, 1)]);
    let ben = result(&catalogue, "Ben", &[(1, 4), (2, 4)]);
    let view = compare(&catalogue, &ada, Some(&ben));

    let row = &view.sections[0].rows[0];
    assert_eq!((row.left, row.right, row.diff), (1, Some(8), 7));
    assert_eq!(view.right.as_ref().map(|p| p.name.as_str()), Some("Ben"));
    assert_eq!(view.emotional[0].capacity, 32);
  }

  #[test]
  fn detail_lists_questions_with_low_flags() {
    let catalogue = seed_catalogue();
    let ada = result(&catalogue, "Ada", &[(74, 2), (75, 3)]);
    let ben = result(&catalogue, "Ben", &[(74, 4)]);
    let detail = category_detail(&catalogue, CategoryId::MOTHER, &ada, Some(&ben));

    assert_eq!(detail.questions.len(), 3);
    assert_eq!(detail.left_total, 5);
    assert_eq!(detail.right_total, Some(4));
    let first = &detail.questions[0];
    assert_eq!(first.category_code, "24a");
    assert!(first.left_low);
    assert!(!first.right_low);
    let third = &detail.questions[2];
    assert_eq!(third.left, None);
    assert!(!third.left_low);
  }
}
