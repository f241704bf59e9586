//! Domain models: questions, taxonomy, answers, score maps, macro profile and the
//! assessment result that bundles them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::category::{CategoryId, CATEGORY_COUNT};

/// One catalogue item. `text` is display only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub id: u32,
  pub category_code: String,
  pub text: String,
}

/// Which family of capacities a category belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
  Secondary,
  Primary,
  Conflict,
  Model,
}

impl CategoryGroup {
  pub const ALL: [CategoryGroup; 4] = [
    CategoryGroup::Secondary,
    CategoryGroup::Primary,
    CategoryGroup::Conflict,
    CategoryGroup::Model,
  ];
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDefinition {
  pub id: CategoryId,
  pub name: String,
  pub group: CategoryGroup,
}

/// A Likert answer in 1..=4 (1 = no, 4 = yes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnswerValue(u8);

impl AnswerValue {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 4;

  pub fn new(value: u8) -> Option<Self> {
    (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
  }

  /// Force any integer into the scale.
  pub fn clamped(value: i64) -> Self {
    Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
  }

  pub fn get(self) -> u8 {
    self.0
  }

  /// Answers of 1 or 2 lean towards "no".
  pub fn is_low(self) -> bool {
    self.0 <= 2
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("answer value {0} is outside 1..=4")]
pub struct InvalidAnswer(pub i64);

impl TryFrom<u8> for AnswerValue {
  type Error = InvalidAnswer;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    AnswerValue::new(value).ok_or(InvalidAnswer(value.into()))
  }
}

impl TryFrom<i64> for AnswerValue {
  type Error = InvalidAnswer;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    u8::try_from(value)
      .ok()
      .and_then(AnswerValue::new)
      .ok_or(InvalidAnswer(value))
  }
}

impl From<AnswerValue> for u8 {
  fn from(value: AnswerValue) -> Self {
    value.0
  }
}

/// Question id → answer. Unanswered questions are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<u32, AnswerValue>);

impl AnswerSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Accept raw values where 0 means "unanswered"; anything else outside 1..=4 is rejected.
  pub fn from_raw(raw: &BTreeMap<u32, i64>) -> Result<Self, InvalidAnswer> {
    let mut set = Self::new();
    for (&question, &value) in raw {
      if value == 0 {
        continue;
      }
      set.insert(question, AnswerValue::try_from(value)?);
    }
    Ok(set)
  }

  /// Later inserts for the same question win.
  pub fn insert(&mut self, question: u32, value: AnswerValue) {
    self.0.insert(question, value);
  }

  pub fn get(&self, question: u32) -> Option<AnswerValue> {
    self.0.get(&question).copied()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(u32, AnswerValue)> for AnswerSet {
  fn from_iter<I: IntoIterator<Item = (u32, AnswerValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Per-category sums. Every bucket is always present; serialized as a JSON
/// object keyed by category id in taxonomy order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScoreMap([u32; CATEGORY_COUNT]);

impl ScoreMap {
  pub fn get(&self, category: CategoryId) -> u32 {
    self.0[category.index()]
  }

  pub fn add(&mut self, category: CategoryId, value: u32) {
    self.0[category.index()] += value;
  }

  pub fn iter(&self) -> impl Iterator<Item = (CategoryId, u32)> + '_ {
    CategoryId::ALL.iter().map(move |id| (*id, self.get(*id)))
  }

  pub fn total(&self) -> u32 {
    self.0.iter().sum()
  }
}

impl Serialize for ScoreMap {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(CATEGORY_COUNT))?;
    for (id, sum) in self.iter() {
      map.serialize_entry(id.as_str(), &sum)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for ScoreMap {
  /// Missing buckets read as 0; unknown keys (including a bare `"24"`) are an error.
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    let mut scores = ScoreMap::default();
    for (key, sum) in raw {
      let id = CategoryId::lookup(&key)
        .ok_or_else(|| de::Error::custom(format!("unknown category id '{key}' in scores")))?;
      scores.0[id.index()] = sum;
    }
    Ok(scores)
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAxes {
  pub active: u32,
  pub passive: u32,
  pub concept: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalAxes {
  #[serde(rename = "self")]
  pub self_: u32,
  pub we: u32,
  pub ideal: u32,
}

/// Social axes come from categories 1..=11, emotional axes from 12..=19.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroProfile {
  pub social: SocialAxes,
  pub emotional: EmotionalAxes,
}

/// Label for one point of the answer scale.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scale {
  pub value: AnswerValue,
  pub label: String,
  pub short: String,
}

/// Static reference data: questions in presentation order, the category
/// taxonomy and the answer scale. Never mutated after startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalogue {
  pub questions: Vec<Question>,
  pub categories: Vec<CategoryDefinition>,
  pub scales: Vec<Scale>,
}

impl Catalogue {
  pub fn category(&self, id: CategoryId) -> Option<&CategoryDefinition> {
    self.categories.iter().find(|c| c.id == id)
  }

  pub fn categories_in(&self, group: CategoryGroup) -> impl Iterator<Item = &CategoryDefinition> + '_ {
    self.categories.iter().filter(move |c| c.group == group)
  }

  /// Questions whose code resolves to `category`, in catalogue order.
  pub fn questions_in(&self, category: CategoryId) -> impl Iterator<Item = &Question> + '_ {
    self
      .questions
      .iter()
      .filter(move |q| crate::category::resolve(&q.category_code).category() == Some(category))
  }
}

/// One respondent's finished assessment. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
  pub id: String,
  pub date: DateTime<Utc>,
  pub name: String,
  pub answers: AnswerSet,
  pub scores: ScoreMap,
  #[serde(rename = "macro")]
  pub macro_profile: MacroProfile,
}
