use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check (outside /api prefix)
        .route("/health", get(handlers::health))
        // Game lifecycle
        .route("/api/games", post(handlers::create_game))
        .route("/api/games/{id}", get(handlers::get_game))
        // Move queries and execution
        .route(
            "/api/games/{id}/pieces/{pos}/moves",
            get(handlers::piece_moves),
        )
        .route("/api/games/{id}/moves", post(handlers::make_move))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
