//! Builtin registry tests
//!
//! Exercises the production loader table through the HTTP surface. Only
//! the embedded mapping loaders are invoked; nothing here touches the
//! network.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use nflgate::loaders::builtin;
use nflgate::server::router;

fn app() -> Router {
    router(Arc::new(builtin()), true)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_load(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/load")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_builtin_loaders_are_all_listed() {
    let request = Request::builder()
        .uri("/loaders")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);

    let names: HashSet<_> = body["loaders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect();

    let expected: HashSet<String> = [
        "load_schedules",
        "load_pbp",
        "load_injuries",
        "load_players",
        "load_teams",
        "team_abbr_mapping",
        "team_abbr_mapping_norelocate",
        "player_name_mapping",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_builtin_descriptors_carry_docs_and_parameters() {
    let request = Request::builder()
        .uri("/loaders")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(request).await;

    for loader in body["loaders"].as_array().unwrap() {
        let doc = loader["doc"].as_str().unwrap();
        assert!(!doc.is_empty());
        assert!(!doc.contains('\n'));
    }

    let teams = body["loaders"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "load_teams")
        .unwrap();
    assert_eq!(teams["parameters"][0]["name"], "current");
    assert_eq!(teams["parameters"][0]["default"], Value::Bool(true));
}

#[tokio::test]
async fn test_team_abbr_mapping_relocates_franchises() {
    let (status, body) = send(post_load(r#"{"loader":"team_abbr_mapping"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["row_count"], 1);
    assert_eq!(body["data"][0]["OAK"], "LV");
    assert_eq!(body["data"][0]["STL"], "LA");
}

#[tokio::test]
async fn test_norelocate_mapping_keeps_historical_codes() {
    let (status, body) =
        send(post_load(r#"{"loader":"team_abbr_mapping_norelocate"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["OAK"], "OAK");
}

#[tokio::test]
async fn test_player_name_mapping_is_a_single_record() {
    let (status, body) = send(post_load(r#"{"loader":"player_name_mapping"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["row_count"], 1);
    assert_eq!(body["data"][0]["Gabriel Davis"], "Gabe Davis");
}

#[tokio::test]
async fn test_mapping_loaders_reject_parameters() {
    let (status, body) =
        send(post_load(r#"{"loader":"team_abbr_mapping","params":{"x":1}}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid parameters for loader"));
}

#[tokio::test]
async fn test_frame_loaders_reject_wrongly_typed_seasons() {
    let (status, _) =
        send(post_load(r#"{"loader":"load_schedules","params":{"seasons":"2024"}}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
