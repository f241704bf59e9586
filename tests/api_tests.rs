//! Integration tests for the HTTP API
//!
//! Tests cover:
//! - health and catalogue endpoints
//! - stateless scoring
//! - interactive assessment → history (list, fetch, delete)
//! - CSV preview and import, including "not ready" mappings
//! - comparison and category drill-down

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method
use wippf_backend::config::AppConfig;
use wippf_backend::{build_router, AppState};

/// Test helper: fresh in-memory app with the built-in catalogue
fn setup_app() -> Router {
    build_router(Arc::new(AppState::ephemeral(&AppConfig::default())))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return (status, Value::Null);
    }
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health / Catalogue
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_catalogue_lists_questions_categories_and_scales() {
    let app = setup_app();
    let (status, body) = send(&app, get("/api/v1/catalogue")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 88);
    assert_eq!(body["categories"].as_array().unwrap().len(), 29);
    assert_eq!(body["scales"].as_array().unwrap().len(), 4);
    assert_eq!(body["questions"][0]["category_code"], "1a");
    assert_eq!(body["categories"][23]["id"], "24m");
}

// =============================================================================
// Scoring
// =============================================================================

#[tokio::test]
async fn test_score_endpoint_is_total_and_stateless() {
    let app = setup_app();
    // 1 → "1a", 2 → "1b", 74 → "24a" in the built-in catalogue
    let (status, body) = send(
        &app,
        post_json("/api/v1/score", json!({ "answers": { "1": 4, "2": 2, "74": 3, "3": 0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let scores = body["scores"].as_object().unwrap();
    assert_eq!(scores.len(), 29);
    assert!(!scores.contains_key("24"));
    assert_eq!(scores["1"], 6);
    assert_eq!(scores["24m"], 3);
    assert_eq!(body["macro"]["social"]["active"], 4);
    assert_eq!(body["macro"]["social"]["passive"], 2);
    assert_eq!(body["macro"]["emotional"]["self"], 0);

    let (_, history) = send(&app, get("/api/v1/assessments")).await;
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_score_rejects_values_above_the_scale() {
    let app = setup_app();
    let (status, body) = send(&app, post_json("/api/v1/score", json!({ "answers": { "1": 7 } }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("outside 1..=4"));
}

#[tokio::test]
async fn test_score_rejects_out_of_range_integers_as_json() {
    let app = setup_app();
    for value in [json!(300), json!(-1)] {
        let (status, body) = send(&app, post_json("/api/v1/score", json!({ "answers": { "1": value } }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{value}");
        assert!(body["error"].as_str().unwrap().contains("outside 1..=4"), "{value}");
    }
}

#[tokio::test]
async fn test_malformed_bodies_get_a_json_error() {
    let app = setup_app();
    for body in [
        json!({ "answers": { "x": 1 } }),
        json!({ "answers": { "1": 2.5 } }),
        json!({ "answers": [1, 2] }),
    ] {
        let (status, reply) = send(&app, post_json("/api/v1/score", body.clone())).await;
        assert!(status.is_client_error(), "{body}: {status}");
        assert!(reply["error"].as_str().unwrap().starts_with("Invalid request body"), "{body}");
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/assessments")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, reply) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reply["error"].is_string());
}

// =============================================================================
// Assessments / History
// =============================================================================

#[tokio::test]
async fn test_assessment_lifecycle() {
    let app = setup_app();

    let (status, first) = send(
        &app,
        post_json("/api/v1/assessments", json!({ "name": "Ada", "answers": { "1": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "Ada");
    assert_eq!(first["scores"]["1"], 4);
    assert!(first["date"].as_str().unwrap().contains('T'));
    let first_id = first["id"].as_str().unwrap().to_string();

    let (_, second) = send(
        &app,
        post_json("/api/v1/assessments", json!({ "name": "Ben", "answers": {} })),
    )
    .await;
    let second_id = second["id"].as_str().unwrap().to_string();

    // newest first
    let (_, list) = send(&app, get("/api/v1/assessments")).await;
    let ids: Vec<&str> = list.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, [second_id.as_str(), first_id.as_str()]);

    let (status, fetched) = send(&app, get(&format!("/api/v1/assessments/{first_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);

    let (status, _) = send(&app, delete(&format!("/api/v1/assessments/{first_id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, delete(&format!("/api/v1/assessments/{first_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get(&format!("/api/v1/assessments/{first_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = setup_app();
    let (status, _) = send(
        &app,
        post_json("/api/v1/assessments", json!({ "name": "   ", "answers": { "1": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// CSV import
// =============================================================================

const SHEET: &str = "Question;Anna;Ben\n1;4;9\n2;2;0\n74;3;abc\n";

#[tokio::test]
async fn test_import_preview_suggests_names() {
    let app = setup_app();
    let (status, body) = send(&app, post_json("/api/v1/import/preview", json!({ "text": SHEET }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"], json!(["Question", "Anna", "Ben"]));
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["remaining_rows"], 0);
    assert_eq!(body["suggested_names"][1], "Anna");
}

#[tokio::test]
async fn test_import_preview_of_garbage_is_empty() {
    let app = setup_app();
    let (status, body) = send(&app, post_json("/api/v1/import/preview", json!({ "text": "\n ; \n" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["column_count"], 0);
    assert_eq!(body["rows"], json!([]));
}

#[tokio::test]
async fn test_import_creates_one_result_per_column() {
    let app = setup_app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/import",
            json!({
                "text": SHEET,
                "question_column": 0,
                "score_columns": [{ "index": 1, "name": "Anna" }, { "index": 2 }]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imported"], 2);

    let anna = &body["results"][0];
    assert_eq!(anna["name"], "Anna");
    assert_eq!(anna["scores"]["1"], 6);
    assert_eq!(anna["scores"]["24m"], 3);
    assert_eq!(anna["macro"]["social"]["active"], 4);

    let ben = &body["results"][1];
    assert_eq!(ben["name"], "Person 2");
    assert_eq!(ben["answers"], json!({ "1": 4, "2": 1 }));
    assert_eq!(ben["scores"]["24m"], 0);

    let (_, list) = send(&app, get("/api/v1/assessments")).await;
    let names: Vec<&str> = list.as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Anna", "Person 2"]);
}

#[tokio::test]
async fn test_incomplete_mapping_imports_nothing() {
    let app = setup_app();
    for body in [
        json!({ "text": SHEET, "score_columns": [{ "index": 1 }] }),
        json!({ "text": SHEET, "question_column": 0, "score_columns": [] }),
        json!({ "text": SHEET, "question_column": 1, "score_columns": [{ "index": 1 }] }),
    ] {
        let (status, reply) = send(&app, post_json("/api/v1/import", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(reply["error"].as_str().unwrap().starts_with("Import not ready"));
    }
    let (_, list) = send(&app, get("/api/v1/assessments")).await;
    assert!(list.as_array().unwrap().is_empty());
}

// =============================================================================
// Comparison / Drill-down
// =============================================================================

async fn create(app: &Router, name: &str, answers: Value) -> String {
    let (_, body) = send(app, post_json("/api/v1/assessments", json!({ "name": name, "answers": answers }))).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_compare_two_results() {
    let app = setup_app();
    let ada = create(&app, "Ada", json!({ "1": 1 })).await;
    let ben = create(&app, "Ben", json!({ "1": 4, "2": 4 })).await;

    let (status, body) = send(&app, get(&format!("/api/v1/compare?left={ada}&right={ben}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["right"]["name"], "Ben");
    assert_eq!(body["sections"][0]["group"], "secondary");
    let row = &body["sections"][0]["rows"][0];
    assert_eq!(row["id"], "1");
    assert_eq!(row["left"], 1);
    assert_eq!(row["right"], 8);
    assert_eq!(row["diff"], 7);
    assert_eq!(body["social"][0]["axis"], "active");
    assert_eq!(body["social"][0]["capacity"], 44);
    assert_eq!(body["emotional"][0]["axis"], "self");

    let (status, _) = send(&app, get(&format!("/api/v1/compare?left={ada}&right=missing"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_detail() {
    let app = setup_app();
    let ada = create(&app, "Ada", json!({ "74": 2, "75": 4 })).await;

    let (status, body) = send(&app, get(&format!("/api/v1/assessments/{ada}/categories/24m"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["left_total"], 6);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["questions"][0]["left"], 2);
    assert_eq!(body["questions"][0]["left_low"], true);
    assert_eq!(body["questions"][2]["left"], Value::Null);

    let (status, _) = send(&app, get(&format!("/api/v1/assessments/{ada}/categories/24"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
