use axum::{
    Router,
    routing::{get, post},
};
use cbproxy_core::{ClientFactory, Translator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;

/// Application state shared across handlers
pub struct AppState<F: ClientFactory> {
    pub translator: Translator<F>,
}

impl<F: ClientFactory> AppState<F> {
    pub fn new(translator: Translator<F>) -> Self {
        AppState { translator }
    }
}

/// Create the proxy router
pub fn create_router<F: ClientFactory + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/proxy", post(handlers::proxy::<F>))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::root))
        .fallback(handlers::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
