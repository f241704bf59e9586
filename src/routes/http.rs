//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{FromRequest, Path, Query, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

/// `Json` body extractor whose rejection is reported through `Error` (JSON `{ "error" }`).
#[derive(FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_catalogue(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalogue.as_ref().clone())
}

#[instrument(level = "info", skip(state, body), fields(answers = body.answers.len()))]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  JsonBody(body): JsonBody<ScoreIn>,
) -> Result<impl IntoResponse> {
  Ok(Json(score_only(&state, &body.answers)?))
}

#[instrument(level = "info", skip(state, body), fields(name = %body.name, answers = body.answers.len()))]
pub async fn http_post_assessment(
  State(state): State<Arc<AppState>>,
  JsonBody(body): JsonBody<AssessmentIn>,
) -> Result<impl IntoResponse> {
  let result = finalize_assessment(&state, &body.name, &body.answers).await?;
  Ok((StatusCode::CREATED, Json(result)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_assessments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let results = list_results(&state).await;
  info!(target: "history", count = results.len(), "HTTP history served");
  Json(results)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_assessment(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse> {
  Ok(Json(get_result(&state, &id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_assessment(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse> {
  delete_result(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_category_detail(
  State(state): State<Arc<AppState>>,
  Path((id, category)): Path<(String, String)>,
  Query(q): Query<DetailQuery>,
) -> Result<impl IntoResponse> {
  Ok(Json(detail_for(&state, &id, &category, q.compare.as_deref()).await?))
}

#[instrument(level = "info", skip(state), fields(left = %q.left, right = ?q.right))]
pub async fn http_get_compare(
  State(state): State<Arc<AppState>>,
  Query(q): Query<CompareQuery>,
) -> Result<impl IntoResponse> {
  Ok(Json(compare_results(&state, &q.left, q.right.as_deref()).await?))
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_import_preview(JsonBody(body): JsonBody<PreviewIn>) -> impl IntoResponse {
  let preview = preview_import(&body.text);
  info!(target: "import", rows = preview.rows.len() + preview.remaining_rows, columns = preview.column_count, "HTTP import preview served");
  Json(preview)
}

#[instrument(level = "info", skip(state, body), fields(question_column = ?body.question_column, score_columns = body.score_columns.len()))]
pub async fn http_post_import(
  State(state): State<Arc<AppState>>,
  JsonBody(body): JsonBody<ImportIn>,
) -> Result<impl IntoResponse> {
  let results = import_csv(&state, &body).await?;
  info!(target: "import", imported = results.len(), "HTTP import stored");
  Ok((StatusCode::CREATED, Json(ImportOut { imported: results.len(), results })))
}
