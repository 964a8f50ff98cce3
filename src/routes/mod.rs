use crate::{middleware::cors::cors_layer, state::AppState};
use axum::{middleware, Router};

mod layout;
mod leaderboard;
mod marketplace;
mod public;
mod server;
mod wallet;

/// Function for creating the router with all the application routes:
/// the rendered pages, the JSON API and the embedded assets
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(leaderboard::page_router())
        .merge(marketplace::router())
        .merge(wallet::router())
        .nest("/api", api_router())
        .nest_service("/assets", public::PublicContent)
        .with_state(state)
}

/// Creates a router for the routes that reside under /api
fn api_router() -> Router<AppState> {
    Router::new()
        // Leaderboard routing
        .nest("/leaderboard", leaderboard::api_router())
        // Server details routes
        .nest("/server", server::router())
        // CORS middleware is applied to all API routes to allow browser access
        .layer(middleware::from_fn(cors_layer))
}
