//! HTTP API tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`,
//! no socket involved.

use std::time::Duration;

use algotrace_core::Snapshot;
use algotrace_generators::linear_search;
use algotrace_vis::{VisServer, MAX_VALUES};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> (VisServer, Router) {
    let trace = linear_search(&[5, 3, 8, 1, 9], 8).map(Snapshot::from);
    let server = VisServer::new(trace, "linear_search", Duration::from_millis(100));
    let router = server.router();
    (server, router)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(path).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await
}

async fn post_empty(app: &Router, path: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn status_reports_the_loaded_trace() {
    let (_server, app) = test_app();
    let (status, body) = get_json(&app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["algorithm"], "linear_search");
    assert_eq!(body["steps"], 5);
}

#[tokio::test]
async fn manual_stepping_moves_the_cursor() {
    let (_server, app) = test_app();
    for _ in 0..3 {
        post_json(&app, "/api/playback/step", json!({ "direction": "forward" })).await;
    }
    let (status, body) =
        post_json(&app, "/api/playback/step", json!({ "direction": "backward" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cursor"], 2);
    assert_eq!(body["state"], "paused");

    let (_, step) = get_json(&app, "/api/step").await;
    assert_eq!(step["status"]["cursor"], 2);
    assert_eq!(step["step"]["kind"], "compare");
    assert_eq!(step["step"]["payload"]["type"], "array");
}

#[tokio::test]
async fn seek_is_clamped() {
    let (_server, app) = test_app();
    let (_, body) = post_json(&app, "/api/playback/seek", json!({ "index": 99 })).await;
    assert_eq!(body["cursor"], 4);

    let (_, body) = post_empty(&app, "/api/playback/reset").await;
    assert_eq!(body["cursor"], 0);
    assert_eq!(body["state"], "stopped");
}

#[tokio::test]
async fn speed_rejects_zero() {
    let (_server, app) = test_app();
    let (status, body) = post_json(&app, "/api/playback/speed", json!({ "delay_ms": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = post_json(&app, "/api/playback/speed", json!({ "delay_ms": 40 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["delay_ms"], 40);
}

#[tokio::test]
async fn play_then_pause() {
    let (server, app) = test_app();
    let (_, body) = post_empty(&app, "/api/playback/play").await;
    assert_eq!(body["state"], "playing");
    let (_, body) = post_empty(&app, "/api/playback/pause").await;
    assert_eq!(body["state"], "paused");
    let (_, body) = post_empty(&app, "/api/playback/resume").await;
    assert_eq!(body["state"], "playing");
    server.driver().pause().await;
}

#[tokio::test]
async fn trace_request_replaces_the_trace() {
    let (_server, app) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/trace",
        json!({ "algorithm": "n_queens", "size": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cursor"], 0);
    assert_eq!(body["state"], "stopped");

    let (_, status) = get_json(&app, "/api/status").await;
    assert_eq!(status["algorithm"], "n_queens");

    let (_, step) = get_json(&app, "/api/step").await;
    assert_eq!(step["step"]["payload"]["type"], "board");
}

#[tokio::test]
async fn invalid_trace_request_is_400_and_keeps_the_player() {
    let (_server, app) = test_app();
    post_json(&app, "/api/playback/seek", json!({ "index": 2 })).await;

    let (status, body) = post_json(
        &app,
        "/api/trace",
        json!({ "algorithm": "binary_search", "values": [1, 2, 3], "target": "abc" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("\"abc\""));

    let (status, body) = post_json(
        &app,
        "/api/trace",
        json!({ "algorithm": "binary_search", "values": [3, 1, 2], "target": "1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("sorted"));

    let (_, playback) = get_json(&app, "/api/playback").await;
    assert_eq!(playback["cursor"], 2);
    assert_eq!(playback["len"], 5);
    let (_, status) = get_json(&app, "/api/status").await;
    assert_eq!(status["algorithm"], "linear_search");
}

#[tokio::test]
async fn oversized_or_overflowing_input_is_400() {
    let (_server, app) = test_app();

    let (status, body) = post_json(
        &app,
        "/api/trace",
        json!({ "algorithm": "bubble_sort", "values": vec![0; MAX_VALUES + 1] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("limit"));

    let (status, body) = post_json(
        &app,
        "/api/trace",
        json!({
            "algorithm": "dijkstra",
            "graph": { "directed": true, "nodes": 3, "edges": [[0, 1, i64::MAX], [1, 2, 1]] },
            "source": 0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("too large"));

    let (_, playback) = get_json(&app, "/api/playback").await;
    assert_eq!(playback["len"], 5);
}

#[tokio::test(start_paused = true)]
async fn playback_advances_on_the_tick() {
    let (server, app) = test_app();
    post_empty(&app, "/api/playback/play").await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    let (_, body) = get_json(&app, "/api/playback").await;
    assert_eq!(body["cursor"], 2);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(server.driver().status().await.cursor, 4);
    let (_, body) = get_json(&app, "/api/playback").await;
    assert_eq!(body["state"], "finished");
}
