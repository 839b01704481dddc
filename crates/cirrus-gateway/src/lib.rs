//! HTTP control surface for the cirrus instance control plane.
//!
//! This crate is the thin plumbing around the lifecycle controller: it
//! translates HTTP requests into controller calls and controller results
//! into HTTP responses and status codes. No decision logic lives here.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Clients                      │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │               cirrus-gateway                  │
//! │   Router + Handlers + error translation       │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │        cirrus-control (lifecycle)             │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │     cirrus-provider (remote cloud API)        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cirrus_control::LifecycleController;
//! use cirrus_gateway::{create_router, AppState, GatewayConfig};
//! use cirrus_provider::{HttpComputeProvider, ProviderConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(HttpComputeProvider::new(ProviderConfig::new(
//!     "https://compute.example.com",
//! )));
//! let control = Arc::new(LifecycleController::new(provider));
//!
//! let state = AppState::new(control, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
