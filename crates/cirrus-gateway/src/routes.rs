//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use cirrus_control::InstanceControl;

use crate::handlers::{health, instances};
use crate::state::AppState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET  /health` - Health check (public)
/// - `GET  /instances` - List instances
/// - `POST /instances/stop/{instance_id}` - Stop an instance
/// - `POST /instances/start/{instance_id}` - Start an instance
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: InstanceControl + 'static,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/instances", get(instances::list_instances::<C>))
        .route(
            "/instances/stop/{instance_id}",
            post(instances::stop_instance::<C>),
        )
        .route(
            "/instances/start/{instance_id}",
            post(instances::start_instance::<C>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_any_origin() {
        let origins = vec!["*".to_string()];
        let _layer = build_cors_layer(&origins);
    }

    #[test]
    fn cors_specific_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://console.example.com".to_string(),
        ];
        let _layer = build_cors_layer(&origins);
    }
}
