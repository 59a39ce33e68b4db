//! Full-exchange tests against a real engine process. These need a
//! Stockfish binary; point STOCKFISH_PATH at it and run with
//! `cargo test -- --ignored`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chess_core::START_FEN;
use serde_json::{json, Value};
use server::config::Config;
use tower::ServiceExt;

fn live_app() -> axum::Router {
    server::create_router(Config::from_env())
}

async fn post_json(app: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
#[ignore = "requires a Stockfish binary (set STOCKFISH_PATH)"]
async fn make_move_returns_reply_and_hint() {
    let (status, body) = post_json(
        live_app(),
        "/make_move",
        json!({ "position": "start", "move": "e4", "difficulty": "easy" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["engine_move"].as_str().unwrap().is_empty());
    assert!(!body["best_move"].as_str().unwrap().is_empty());

    // The returned position carries both the human move and the reply:
    // Black has moved, so it is White's turn again.
    let fen = body["board_position"].as_str().unwrap();
    assert_ne!(fen, START_FEN);
    assert!(fen.contains(" w "));
}

#[tokio::test]
#[ignore = "requires a Stockfish binary (set STOCKFISH_PATH)"]
async fn new_game_as_black_gets_an_opening_move() {
    let (status, body) = post_json(
        live_app(),
        "/new_game",
        json!({ "difficulty": "medium", "color": "black" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["engine_move"].as_str().unwrap().is_empty());

    let fen = body["board_position"].as_str().unwrap();
    assert_ne!(fen, START_FEN);
    assert!(fen.contains(" b "));
}

#[tokio::test]
#[ignore = "requires a Stockfish binary (set STOCKFISH_PATH)"]
async fn suggest_move_returns_a_move() {
    let (status, body) = post_json(
        live_app(),
        "/suggest_move",
        json!({ "position": START_FEN }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["best_move"].as_str().unwrap().is_empty());
}
