//! Core types for the cirrus instance control plane.
//!
//! This crate provides the foundational vocabulary shared by every other
//! crate in the workspace:
//!
//! - **Identifiers**: the opaque, provider-assigned [`InstanceId`]
//! - **States**: the provider's [`InstanceState`] lifecycle vocabulary
//!
//! # Example
//!
//! ```
//! use cirrus_core::{InstanceId, InstanceState};
//!
//! let id = InstanceId::new("i-0abc123def456");
//! let state: InstanceState = "shutting-down".parse().unwrap();
//! assert_eq!(state, InstanceState::ShuttingDown);
//! assert_eq!(id.as_str(), "i-0abc123def456");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod state;

pub use ids::InstanceId;
pub use state::{InstanceState, ParseStateError};
