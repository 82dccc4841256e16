//! HTTP-level tests: drive the axum router in-process and assert on the
//! JSON contract — snapshots, encoded move lists, and error codes.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use chess_api::api::router::create_router;
use chess_api::api::state::AppState;
use chess_api::config::AppConfig;

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_game(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/games", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn post_move(app: &Router, id: &str, from: &str, to: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/api/games/{id}/moves"),
        Some(json!({ "from": from, "to": to })),
    )
    .await
}

// =====================================================================
// Health
// =====================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "chess-api");
}

// =====================================================================
// Game lifecycle
// =====================================================================

#[tokio::test]
async fn create_returns_a_fresh_snapshot() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/games", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["id"].as_str().unwrap();
    assert_eq!(id.len(), 6);
    assert_eq!(body["currentTurn"], "white");
    assert_eq!(body["status"], "active");
    assert_eq!(body["check"], false);
    assert_eq!(body["checkmate"], false);
    assert_eq!(body["stalemate"], false);
    // Rank 8 first: black rook on a8, white king on e1.
    assert_eq!(body["board"][0][0], "bR");
    assert_eq!(body["board"][7][4], "wK");
    assert_eq!(body["board"][4][4], Value::Null);
}

#[tokio::test]
async fn get_returns_the_stored_game() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = send(&app, "GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
}

#[tokio::test]
async fn unknown_game_is_404() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/games/nope42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "GAME_NOT_FOUND");
}

// =====================================================================
// Move listing
// =====================================================================

#[tokio::test]
async fn pawn_move_list_is_encoded() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/games/{id}/pieces/e2/moves"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let moves: Vec<&str> = body["moves"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap())
        .collect();
    // Two pushes plus the two diagonal coverage markers.
    assert!(moves.contains(&"e3:"));
    assert!(moves.contains(&"e4:"));
    assert!(moves.contains(&"d3:/#"));
    assert!(moves.contains(&"f3:/#"));
}

#[tokio::test]
async fn empty_square_is_404() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/games/{id}/pieces/e4/moves"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "PIECE_NOT_FOUND");
}

#[tokio::test]
async fn malformed_square_is_400() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/games/{id}/pieces/z9/moves"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

// =====================================================================
// Move execution
// =====================================================================

#[tokio::test]
async fn opening_move_updates_the_snapshot() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = post_move(&app, &id, "e2", "e4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentTurn"], "black");
    assert_eq!(body["board"][4][4], "wP");
    assert_eq!(body["board"][6][4], Value::Null);
}

#[tokio::test]
async fn missing_destination_is_400() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/games/{id}/moves"),
        Some(json!({ "from": "e2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn illegal_destination_is_rejected() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = post_move(&app, &id, "e2", "e5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ILLEGAL_MOVE");

    // The board is untouched.
    let (_, snapshot) = send(&app, "GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(snapshot["currentTurn"], "white");
    assert_eq!(snapshot["board"][6][4], "wP");
}

#[tokio::test]
async fn moving_out_of_turn_is_rejected() {
    let app = app();
    let id = create_game(&app).await;
    let (status, body) = post_move(&app, &id, "e7", "e5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ILLEGAL_MOVE");
}

#[tokio::test]
async fn capture_with_matching_target() {
    let app = app();
    let id = create_game(&app).await;
    post_move(&app, &id, "e2", "e4").await;
    post_move(&app, &id, "d7", "d5").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/games/{id}/moves"),
        Some(json!({ "from": "e4", "to": "d5", "capture": "d5" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"][3][3], "wP");
}

#[tokio::test]
async fn capture_with_mismatched_target_is_rejected() {
    let app = app();
    let id = create_game(&app).await;
    post_move(&app, &id, "e2", "e4").await;
    post_move(&app, &id, "d7", "d5").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/games/{id}/moves"),
        Some(json!({ "from": "e4", "to": "d5", "capture": "e7" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ILLEGAL_MOVE");
}

// =====================================================================
// Check and game over
// =====================================================================

#[tokio::test]
async fn check_appears_in_the_snapshot() {
    let app = app();
    let id = create_game(&app).await;
    post_move(&app, &id, "e2", "e4").await;
    post_move(&app, &id, "f7", "f6").await;
    let (status, body) = post_move(&app, &id, "d1", "h5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "check");
    assert_eq!(body["check"], true);
    assert_eq!(body["checkedKing"], "e8");
    assert_eq!(body["checkers"][0], "h5");
}

#[tokio::test]
async fn fools_mate_over_http() {
    let app = app();
    let id = create_game(&app).await;
    post_move(&app, &id, "f2", "f3").await;
    post_move(&app, &id, "e7", "e5").await;
    post_move(&app, &id, "g2", "g4").await;
    let (status, body) = post_move(&app, &id, "d8", "h4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "checkmate");
    assert_eq!(body["checkmate"], true);
    assert_eq!(body["stalemate"], false);
    assert_eq!(body["checkedKing"], "e1");

    // A finished game absorbs no further moves.
    let (status, body) = post_move(&app, &id, "a2", "a3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "GAME_OVER");
}

#[tokio::test]
async fn games_are_independent() {
    let app = app();
    let first = create_game(&app).await;
    let second = create_game(&app).await;
    assert_ne!(first, second);

    post_move(&app, &first, "e2", "e4").await;

    let (_, snapshot) = send(&app, "GET", &format!("/api/games/{second}"), None).await;
    assert_eq!(snapshot["currentTurn"], "white");
    assert_eq!(snapshot["board"][6][4], "wP");
}
