//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AssessmentResult, MacroProfile, ScoreMap};
use crate::import::{ColumnMapping, ScoreColumn};

//
// HTTP request/response DTOs
//

/// Raw answers as sent by a client: question id → 0..=4 (0 = unanswered).
/// Values are range-checked after extraction so every bad value gets the same 422.
pub type RawAnswers = BTreeMap<u32, i64>;

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    #[serde(default)]
    pub answers: RawAnswers,
}
#[derive(Debug, Serialize)]
pub struct ScoreOut {
    pub scores: ScoreMap,
    #[serde(rename = "macro")]
    pub macro_profile: MacroProfile,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentIn {
    pub name: String,
    #[serde(default)]
    pub answers: RawAnswers,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: String,
    pub right: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub compare: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewIn {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportIn {
    pub text: String,
    #[serde(default)]
    pub question_column: Option<usize>,
    #[serde(default)]
    pub score_columns: Vec<ScoreColumn>,
}

impl ImportIn {
    pub fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            question_column: self.question_column,
            score_columns: self.score_columns.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportOut {
    pub imported: usize,
    pub results: Vec<AssessmentResult>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
