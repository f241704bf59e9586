//! CSV import: delimited text → row table → one assessment per score column.
//!
//! Flow:
//! 1) `parse_table` splits the text once (lines, then `,` or `;`), trims cells and
//!    drops blank rows. The first row is the header.
//! 2) The caller picks a question-id column and one or more score columns.
//! 3) Each score column is extracted on its own into an `AnswerSet` (unparseable
//!    cells skipped, scores clamped into 1..=4) and scored like an interactive run.
//!
//! There is no quoting: a delimiter inside a cell always splits it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::{AnswerSet, AnswerValue, AssessmentResult, Question};

/// Data rows shown in a mapping preview.
pub const PREVIEW_ROWS: usize = 5;

/// Parsed CSV: header row followed by data rows. Rows may have different widths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTable {
  rows: Vec<Vec<String>>,
}

/// Split `text` into trimmed cells. Never fails; unusable text gives an empty table.
pub fn parse_table(text: &str) -> ParsedTable {
  let rows = text
    .lines()
    .map(|line| {
      line
        .split(|c: char| c == ',' || c == ';')
        .map(|cell| cell.trim().to_string())
        .collect::<Vec<_>>()
    })
    .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
    .collect();
  ParsedTable { rows }
}

impl ParsedTable {
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn header(&self) -> &[String] {
    self.rows.first().map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn data_rows(&self) -> &[Vec<String>] {
    self.rows.get(1..).unwrap_or(&[])
  }

  /// Widest row, header included.
  pub fn column_count(&self) -> usize {
    self.rows.iter().map(Vec::len).max().unwrap_or(0)
  }

  /// Header text for `column`, if it has any.
  pub fn suggested_name(&self, column: usize) -> Option<&str> {
    self.header().get(column).map(String::as_str).filter(|h| !h.trim().is_empty())
  }

  pub fn preview(&self, limit: usize) -> TablePreview {
    let data = self.data_rows();
    let shown = data.len().min(limit);
    let column_count = self.column_count();
    TablePreview {
      header: self.header().to_vec(),
      rows: data[..shown].to_vec(),
      remaining_rows: data.len() - shown,
      column_count,
      suggested_names: (0..column_count).map(|c| self.suggested_name(c).map(str::to_string)).collect(),
    }
  }
}

/// What the mapping step needs to show: header, the first rows, name suggestions.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TablePreview {
  pub header: Vec<String>,
  pub rows: Vec<Vec<String>>,
  pub remaining_rows: usize,
  pub column_count: usize,
  pub suggested_names: Vec<Option<String>>,
}

/// One respondent column, optionally labelled.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScoreColumn {
  pub index: usize,
  #[serde(default)]
  pub name: Option<String>,
}

impl ScoreColumn {
  /// The label if it is not blank, else `Person <index>`.
  pub fn display_name(&self) -> String {
    match &self.name {
      Some(name) if !name.trim().is_empty() => name.clone(),
      _ => format!("Person {}", self.index),
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ColumnMapping {
  #[serde(default)]
  pub question_column: Option<usize>,
  #[serde(default)]
  pub score_columns: Vec<ScoreColumn>,
}

/// Why a mapping cannot be imported yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotReady {
  #[error("no question column selected")]
  NoQuestionColumn,
  #[error("no score column selected")]
  NoScoreColumns,
  #[error("column {0} is both the question column and a score column")]
  ScoreIsQuestionColumn(usize),
  #[error("column {0} does not exist in the table")]
  ColumnOutOfRange(usize),
}

impl ColumnMapping {
  /// Check the mapping against `table`; returns the question column when ready.
  pub fn validate(&self, table: &ParsedTable) -> Result<usize, NotReady> {
    let question = self.question_column.ok_or(NotReady::NoQuestionColumn)?;
    if self.score_columns.is_empty() {
      return Err(NotReady::NoScoreColumns);
    }
    let width = table.column_count();
    if question >= width {
      return Err(NotReady::ColumnOutOfRange(question));
    }
    for col in &self.score_columns {
      if col.index == question {
        return Err(NotReady::ScoreIsQuestionColumn(col.index));
      }
      if col.index >= width {
        return Err(NotReady::ColumnOutOfRange(col.index));
      }
    }
    Ok(question)
  }
}

/// Leading-integer parse: optional sign, then digits; anything after is ignored.
/// `"3.7"` reads as 3, `"abc"` and `""` as nothing. Oversized values saturate.
pub fn parse_cell_int(cell: &str) -> Option<i64> {
  let s = cell.trim();
  let (negative, unsigned) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
  if len == 0 {
    return None;
  }
  let magnitude: i64 = unsigned[..len].parse().unwrap_or(i64::MAX);
  Some(if negative { -magnitude } else { magnitude })
}

/// Answers held in one score column. Rows where either cell is unusable are skipped.
pub fn extract_answers(table: &ParsedTable, question_column: usize, score_column: usize) -> AnswerSet {
  let mut answers = AnswerSet::new();
  let mut skipped = 0usize;
  for row in table.data_rows() {
    let question = row
      .get(question_column)
      .and_then(|cell| parse_cell_int(cell))
      .and_then(|id| u32::try_from(id).ok());
    let score = row.get(score_column).and_then(|cell| parse_cell_int(cell));
    match (question, score) {
      (Some(question), Some(score)) => answers.insert(question, AnswerValue::clamped(score)),
      _ => skipped += 1,
    }
  }
  debug!(target: "import", score_column, answered = answers.len(), skipped, "Extracted score column");
  answers
}

/// Build one result per score column. Columns are independent of each other.
#[instrument(level = "info", skip(table, mapping, questions), fields(rows = table.data_rows().len(), columns = mapping.score_columns.len()))]
pub fn import_results(
  table: &ParsedTable,
  mapping: &ColumnMapping,
  questions: &[Question],
) -> Result<Vec<AssessmentResult>, NotReady> {
  let question_column = mapping.validate(table)?;
  let results: Vec<AssessmentResult> = mapping
    .score_columns
    .iter()
    .map(|col| {
      let answers = extract_answers(table, question_column, col.index);
      AssessmentResult::new(col.display_name(), answers, questions)
    })
    .collect();
  info!(target: "import", created = results.len(), "CSV import mapped");
  Ok(results)
}
