//! HTTP surface for playing chess against a UCI engine. Every request
//! reconstructs its session from the caller-supplied position and
//! difficulty; the server holds no game state between calls.

pub mod config;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// Build the application router with CORS and shared config.
pub fn create_router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/new_game", post(routes::game::new_game))
        .route("/make_move", post(routes::game::make_move))
        .route("/suggest_move", post(routes::game::suggest_move))
        .layer(Extension(config))
        .layer(cors)
}
