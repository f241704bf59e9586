//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Scoring raw answers without storing them
//!   - Finalizing an interactive assessment into the history
//!   - CSV preview and import (one result per mapped column)
//!   - Listing, fetching, deleting and comparing stored results

use tracing::{debug, info, instrument, warn};

use crate::category::CategoryId;
use crate::compare::{category_detail, compare, CategoryDetail, Comparison};
use crate::domain::{AnswerSet, AssessmentResult};
use crate::error::{Error, Result};
use crate::import::{import_results, parse_table, TablePreview, PREVIEW_ROWS};
use crate::protocol::{ImportIn, RawAnswers, ScoreOut};
use crate::scoring::{macro_profile, score_answers};
use crate::state::AppState;

fn answer_set(raw: &RawAnswers) -> Result<AnswerSet> {
  AnswerSet::from_raw(raw).map_err(|e| Error::InvalidInput(e.to_string()))
}

#[instrument(level = "info", skip(state, raw), fields(answers = raw.len()))]
pub fn score_only(state: &AppState, raw: &RawAnswers) -> Result<ScoreOut> {
  let answers = answer_set(raw)?;
  let questions = &state.catalogue.questions;
  Ok(ScoreOut {
    scores: score_answers(questions, &answers),
    macro_profile: macro_profile(questions, &answers),
  })
}

/// End of an interactive run: score the answers and put the result in front of the history.
#[instrument(level = "info", skip(state, raw), fields(answers = raw.len()))]
pub async fn finalize_assessment(state: &AppState, name: &str, raw: &RawAnswers) -> Result<AssessmentResult> {
  if name.trim().is_empty() {
    return Err(Error::InvalidInput("name must not be blank".into()));
  }
  let answers = answer_set(raw)?;
  let result = AssessmentResult::new(name, answers, &state.catalogue.questions);
  state.history.write().await.record(result.clone()).await?;
  info!(
    target: "wippf_backend",
    id = %result.id,
    %name,
    answered = result.answers.len(),
    total = result.scores.total(),
    "Assessment recorded"
  );
  Ok(result)
}

pub fn preview_import(text: &str) -> TablePreview {
  let table = parse_table(text);
  if table.is_empty() {
    warn!(target: "import", text_len = text.len(), "CSV text produced no rows");
  }
  table.preview(PREVIEW_ROWS)
}

/// Map the CSV and append all created results as one batch, in column order.
#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn import_csv(state: &AppState, body: &ImportIn) -> Result<Vec<AssessmentResult>> {
  let table = parse_table(&body.text);
  let results = import_results(&table, &body.mapping(), &state.catalogue.questions)?;
  state.history.write().await.record_batch(results.clone()).await?;
  Ok(results)
}

pub async fn list_results(state: &AppState) -> Vec<AssessmentResult> {
  state.history.read().await.list().to_vec()
}

pub async fn get_result(state: &AppState, id: &str) -> Result<AssessmentResult> {
  state
    .history
    .read()
    .await
    .get(id)
    .cloned()
    .ok_or_else(|| Error::NotFound(format!("assessment {id}")))
}

#[instrument(level = "info", skip(state))]
pub async fn delete_result(state: &AppState, id: &str) -> Result<()> {
  if state.history.write().await.delete(id).await? {
    Ok(())
  } else {
    Err(Error::NotFound(format!("assessment {id}")))
  }
}

#[instrument(level = "info", skip(state))]
pub async fn compare_results(state: &AppState, left: &str, right: Option<&str>) -> Result<Comparison> {
  let left = get_result(state, left).await?;
  let right = match right {
    Some(id) => Some(get_result(state, id).await?),
    None => None,
  };
  debug!(target: "wippf_backend", left = %left.id, right = ?right.as_ref().map(|r| r.id.as_str()), "Comparing results");
  Ok(compare(&state.catalogue, &left, right.as_ref()))
}

#[instrument(level = "info", skip(state))]
pub async fn detail_for(state: &AppState, id: &str, category: &str, other: Option<&str>) -> Result<CategoryDetail> {
  let category = CategoryId::lookup(category).ok_or_else(|| Error::NotFound(format!("category {category}")))?;
  let left = get_result(state, id).await?;
  let right = match other {
    Some(other) => Some(get_result(state, other).await?),
    None => None,
  };
  Ok(category_detail(&state.catalogue, category, &left, right.as_ref()))
}
