use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod caller;
pub mod config;
pub mod errors;
pub mod fibonacci;
pub mod handlers;

use config::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/fib/fibonacci", get(handlers::fibonacci_handler))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
