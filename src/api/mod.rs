//! REST API module using Axum
//!
//! Serves the dashboard view and the engines under `/api`.

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::AppState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
