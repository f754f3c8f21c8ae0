//! End-to-end tests for the HTTP surface, driven through the router
//! without a listening socket.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ml2_api::{routes::build_router, state::AppState};
use ml2_core::SimulationEngine;

fn app() -> Router {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/baseline/baseline_variables.json");
    let engine = SimulationEngine::from_file(path).expect("baseline loads");
    build_router(AppState { engine: Arc::new(engine) })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn baseline_returns_indicators_and_catalogue() {
    let response = app()
        .oneshot(Request::get("/baseline").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["indicators"]["years"].as_array().unwrap().len(), 8);
    assert_eq!(body["instruments"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn instruments_lists_the_catalogue() {
    let response = app()
        .oneshot(Request::get("/instruments").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let specs = body.as_array().unwrap();
    assert_eq!(specs.len(), 10);
    assert!(specs.iter().all(|s| s.get("key").is_some()));
}

#[tokio::test]
async fn simulate_with_default_instruments() {
    let response = app()
        .oneshot(post_json("/simulate", json!({ "instruments": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("baseline").is_some());
    assert!(body.get("scenario").is_some());
    assert!(body.get("convergence").is_some());
    assert!(body.get("impacts").is_some());
}

#[tokio::test]
async fn simulate_echoes_name_and_instruments() {
    let response = app()
        .oneshot(post_json(
            "/simulate",
            json!({ "name": "Test", "instruments": { "VIG_X": 1000.0 } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Test");
    assert_eq!(body["instruments"]["VIG_X"], 1000.0);
}

#[tokio::test]
async fn simulate_rejects_unknown_instruments() {
    let response = app()
        .oneshot(post_json("/simulate", json!({ "instruments": { "INVALID": 42.0 } })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid instruments:"));
    assert!(message.contains("Unknown instrument: INVALID"));
}

#[tokio::test]
async fn simulate_rejects_out_of_range_values() {
    let response = app()
        .oneshot(post_json("/simulate", json!({ "instruments": { "VIG_X": 999999.0 } })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn export_csv_streams_an_attachment() {
    let response = app()
        .oneshot(post_json("/export/csv", json!({ "name": "test", "instruments": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/csv"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.len() > 100);
}

#[tokio::test]
async fn export_excel_streams_a_workbook() {
    let response = app()
        .oneshot(post_json("/export/excel", json!({ "name": "test", "instruments": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("spreadsheet"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // XLSX files are ZIP archives
    assert_eq!(&bytes[..2], b"PK");
}
