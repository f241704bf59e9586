//! Score aggregation: per-category sums and the two macro triads.
//!
//! Both aggregators are pure functions of (questions, answers). Neither depends
//! on the order questions are visited in.

use chrono::Utc;
use uuid::Uuid;

use crate::category::{resolve, CategoryCode};
use crate::domain::{AnswerSet, AssessmentResult, MacroProfile, Question, ScoreMap};

/// Base numbers feeding the social triad.
pub const SOCIAL_RANGE: std::ops::RangeInclusive<u32> = 1..=11;
/// Base numbers feeding the emotional triad.
pub const EMOTIONAL_RANGE: std::ops::RangeInclusive<u32> = 12..=19;

/// One axis of the macro profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroAxis {
  Active,
  Passive,
  Concept,
  #[serde(rename = "self")]
  SelfAxis,
  We,
  Ideal,
}

impl MacroAxis {
  pub const SOCIAL: [MacroAxis; 3] = [MacroAxis::Active, MacroAxis::Passive, MacroAxis::Concept];
  pub const EMOTIONAL: [MacroAxis; 3] = [MacroAxis::SelfAxis, MacroAxis::We, MacroAxis::Ideal];

  /// Axis a parsed code feeds, if any. Letters other than a/b/c feed nothing.
  pub fn for_code(code: &CategoryCode) -> Option<MacroAxis> {
    let number = code.number()?;
    let slot = match code.letter()? {
      'a' => 0,
      'b' => 1,
      'c' => 2,
      _ => return None,
    };
    if SOCIAL_RANGE.contains(&number) {
      Some(Self::SOCIAL[slot])
    } else if EMOTIONAL_RANGE.contains(&number) {
      Some(Self::EMOTIONAL[slot])
    } else {
      None
    }
  }

  pub fn read(self, profile: &MacroProfile) -> u32 {
    match self {
      MacroAxis::Active => profile.social.active,
      MacroAxis::Passive => profile.social.passive,
      MacroAxis::Concept => profile.social.concept,
      MacroAxis::SelfAxis => profile.emotional.self_,
      MacroAxis::We => profile.emotional.we,
      MacroAxis::Ideal => profile.emotional.ideal,
    }
  }

  fn slot(self, profile: &mut MacroProfile) -> &mut u32 {
    match self {
      MacroAxis::Active => &mut profile.social.active,
      MacroAxis::Passive => &mut profile.social.passive,
      MacroAxis::Concept => &mut profile.social.concept,
      MacroAxis::SelfAxis => &mut profile.emotional.self_,
      MacroAxis::We => &mut profile.emotional.we,
      MacroAxis::Ideal => &mut profile.emotional.ideal,
    }
  }
}

/// Sum answers into every category bucket. Buckets with no answered question stay at 0.
pub fn score_answers<'a, I>(questions: I, answers: &AnswerSet) -> ScoreMap
where
  I: IntoIterator<Item = &'a Question>,
{
  let mut scores = ScoreMap::default();
  for question in questions {
    let Some(category) = resolve(&question.category_code).category() else { continue };
    if let Some(value) = answers.get(question.id) {
      scores.add(category, u32::from(value.get()));
    }
  }
  scores
}

/// Sum answers into the social (1..=11) and emotional (12..=19) triads.
pub fn macro_profile<'a, I>(questions: I, answers: &AnswerSet) -> MacroProfile
where
  I: IntoIterator<Item = &'a Question>,
{
  let mut profile = MacroProfile::default();
  for question in questions {
    let Some(axis) = CategoryCode::parse(&question.category_code).and_then(|c| MacroAxis::for_code(&c)) else {
      continue;
    };
    if let Some(value) = answers.get(question.id) {
      *axis.slot(&mut profile) += u32::from(value.get());
    }
  }
  profile
}

/// Highest value an axis can reach: questions feeding it times the top answer.
pub fn macro_capacity<'a, I>(questions: I, axis: MacroAxis) -> u32
where
  I: IntoIterator<Item = &'a Question>,
{
  let feeding = questions
    .into_iter()
    .filter_map(|q| CategoryCode::parse(&q.category_code))
    .filter(|code| MacroAxis::for_code(code) == Some(axis))
    .count() as u32;
  feeding * u32::from(crate::domain::AnswerValue::MAX)
}

impl AssessmentResult {
  /// Score `answers` against the catalogue questions and stamp a new id and date.
  pub fn new(name: impl Into<String>, answers: AnswerSet, questions: &[Question]) -> Self {
    let scores = score_answers(questions, &answers);
    let macro_profile = macro_profile(questions, &answers);
    Self {
      id: Uuid::new_v4().to_string(),
      date: Utc::now(),
      name: name.into(),
      answers,
      scores,
      macro_profile,
    }
  }
}
