//! Category codes and the buckets they resolve to.
//!
//! A question carries a code such as `"1a"` or `"24g"`: a decimal base number
//! followed by an optional lowercase sub-axis letter. The base number names the
//! score bucket, except for category 24 whose letters fold into three
//! synthetic buckets (`24m`, `24f`, `24o`).
//!
//! Anything that does not parse, or a category-24 letter outside `a..=i`,
//! resolves to no bucket at all.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of score buckets: 26 numeric categories plus the three folded 24s.
pub const CATEGORY_COUNT: usize = 29;

const CATEGORY_IDS: [&str; CATEGORY_COUNT] = [
  "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
  "18", "19", "20", "21", "22", "23", "24m", "24f", "24o", "25", "26", "27",
];

const SLOT_24M: u8 = 23;
const SLOT_24F: u8 = 24;
const SLOT_24O: u8 = 25;

/// Closed set of score buckets. The inner value is the slot in `CATEGORY_IDS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u8);

impl CategoryId {
  pub const ALL: [CategoryId; CATEGORY_COUNT] = {
    let mut ids = [CategoryId(0); CATEGORY_COUNT];
    let mut i = 0;
    while i < CATEGORY_COUNT {
      ids[i] = CategoryId(i as u8);
      i += 1;
    }
    ids
  };

  pub const MOTHER: CategoryId = CategoryId(SLOT_24M);
  pub const FATHER: CategoryId = CategoryId(SLOT_24F);
  pub const OTHERS: CategoryId = CategoryId(SLOT_24O);

  /// Exact lookup of a bucket by its string id. `"24"` is not a bucket.
  pub fn lookup(id: &str) -> Option<Self> {
    CATEGORY_IDS
      .iter()
      .position(|known| *known == id)
      .map(|slot| CategoryId(slot as u8))
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }

  pub fn as_str(self) -> &'static str {
    CATEGORY_IDS[self.index()]
  }
}

impl fmt::Display for CategoryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category id '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryId {
  type Err = UnknownCategory;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    CategoryId::lookup(s).ok_or_else(|| UnknownCategory(s.to_string()))
  }
}

impl Serialize for CategoryId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for CategoryId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
  }
}

/// Outcome of resolving a category code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
  Resolved(CategoryId),
  Unresolved,
}

impl Resolution {
  pub fn category(self) -> Option<CategoryId> {
    match self {
      Resolution::Resolved(id) => Some(id),
      Resolution::Unresolved => None,
    }
  }
}

/// A parsed `<digits><letter?>` code. Text after the optional letter is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCode {
  digits: String,
  letter: Option<char>,
}

impl CategoryCode {
  /// Parse the leading `\d+[a-z]?` of `code`; `None` when it does not start with a digit.
  pub fn parse(code: &str) -> Option<Self> {
    let digits_len = code.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
      return None;
    }
    let (digits, rest) = code.split_at(digits_len);
    let letter = rest.chars().next().filter(char::is_ascii_lowercase);
    Some(Self { digits: digits.to_string(), letter })
  }

  /// Numeric value of the base, `None` if it does not fit a `u32`.
  pub fn number(&self) -> Option<u32> {
    self.digits.parse().ok()
  }

  pub fn letter(&self) -> Option<char> {
    self.letter
  }

  /// The digit string is matched literally, so `"01"` is not category 1.
  pub fn resolve(&self) -> Resolution {
    if self.digits == "24" {
      return match self.letter {
        Some('a'..='c') => Resolution::Resolved(CategoryId::MOTHER),
        Some('d'..='f') => Resolution::Resolved(CategoryId::FATHER),
        Some('g'..='i') => Resolution::Resolved(CategoryId::OTHERS),
        _ => Resolution::Unresolved,
      };
    }
    match CategoryId::lookup(&self.digits) {
      Some(id) => Resolution::Resolved(id),
      None => Resolution::Unresolved,
    }
  }
}

/// Resolve a raw code string in one step.
pub fn resolve(code: &str) -> Resolution {
  CategoryCode::parse(code)
    .map(|parsed| parsed.resolve())
    .unwrap_or(Resolution::Unresolved)
}
