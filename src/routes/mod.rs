//! HTTP routes for the relay
//!
//! This module defines all HTTP endpoints exposed by the relay.

pub mod health;
pub mod metrics;
pub mod proxy;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
///
/// The cross-origin policy comes from [`Config::allow_all_origins`](crate::Config).
/// When it is off no CORS layer is installed and browsers apply same-origin rules.
pub fn create_router(state: Arc<AppState>) -> Router {
    let relay_routes = Router::new()
        .route("/proxy/n8n", post(proxy::proxy_n8n))
        .route("/proxy/ai", post(proxy::proxy_ai));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    let router = Router::new()
        .merge(public_routes)
        .merge(relay_routes)
        .layer(TraceLayer::new_for_http());

    let router = if state.config.allow_all_origins {
        router.layer(permissive_cors())
    } else {
        router
    };

    router.with_state(state)
}

/// Any origin, any method, any header
fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
