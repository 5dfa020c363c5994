use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    database::Database, log_requests::log_request_middleware, player_service::PlayerService,
    players, AppState,
};

pub fn build_state(db: Database) -> AppState {
    AppState {
        players: Arc::new(PlayerService::new(Arc::new(db))),
    }
}

/// Route table for the public API.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/players",
            post(players::create_player).get(players::get_player),
        )
        .route("/api/players/:id", get(players::get_player_by_id))
        .route("/api/leaderboard", get(players::get_leaderboard))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request_middleware))
}
