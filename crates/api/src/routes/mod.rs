//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod fiscal;
pub mod health;
pub mod renumber;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(fiscal::routes())
        .merge(renumber::routes())
}
