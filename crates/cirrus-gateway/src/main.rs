//! Cirrus Gateway - HTTP control surface for cloud compute instances.
//!
//! This is the main entry point for the gateway service. It wires the
//! HTTP provider client into the lifecycle controller and serves the
//! control API.
//!
//! # Configuration
//!
//! All configuration comes from the environment:
//!
//! - `LISTEN_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `PROVIDER_URL` - base URL of the provider API
//! - `PROVIDER_REGION` - provider region (default `us-east-1`)
//! - `PROVIDER_API_TOKEN` - bearer token for the provider API, if required

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cirrus_control::LifecycleController;
use cirrus_gateway::{create_router, AppState, GatewayConfig};
use cirrus_provider::{ComputeProvider, HttpComputeProvider, ProviderConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cirrus=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cirrus Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let provider_url =
        std::env::var("PROVIDER_URL").unwrap_or_else(|_| "http://localhost:9400".into());
    let provider_region = std::env::var("PROVIDER_REGION").unwrap_or_else(|_| "us-east-1".into());
    let provider_api_token = std::env::var("PROVIDER_API_TOKEN").ok();

    tracing::info!(
        listen_addr = %listen_addr,
        provider_url = %provider_url,
        provider_region = %provider_region,
        has_api_token = provider_api_token.is_some(),
        "Gateway configuration loaded"
    );

    let mut provider_config = ProviderConfig::new(provider_url);
    provider_config.region = provider_region;
    provider_config.api_token = provider_api_token;
    let provider = Arc::new(HttpComputeProvider::new(provider_config));

    // Verify credentials up front; the service still starts if the check
    // fails so a transient provider outage does not block deployment.
    match provider.caller_identity().await {
        Ok(identity) => {
            tracing::info!(account = %identity.account, arn = %identity.arn, "Provider identity resolved");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Provider credentials not properly configured");
        }
    }

    let control = Arc::new(LifecycleController::new(provider));
    tracing::info!("Lifecycle controller initialized");

    let gateway_config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        ..GatewayConfig::default()
    };
    let state = AppState::new(control, gateway_config);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
