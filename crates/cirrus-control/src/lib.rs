//! Instance lifecycle controller for the cirrus control plane.
//!
//! This crate holds the decision logic of the system: given a desired
//! transition (stop or start) and an instance id, it reads the instance's
//! current state from the provider, validates that the transition is legal,
//! issues it, and maps every provider-side outcome into a stable result
//! vocabulary.
//!
//! Illegal transitions are normal, expected outcomes: they come back as
//! [`TransitionResult::Rejected`] values, never as errors. The error
//! channel ([`ControlError`]) is reserved for genuinely exceptional
//! conditions such as an unreachable provider or a malformed response.
//!
//! The controller is stateless and reentrant: every invocation is a fresh
//! read-validate-act cycle against the provider, which remains the single
//! source of truth for instance state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod lifecycle;
pub mod service;
pub mod types;

pub use error::{ControlError, Result};
pub use lifecycle::{Direction, TransitionDenial};
pub use service::{InstanceControl, LifecycleController};
pub use types::{InstanceSummary, RejectionKind, TransitionRequest, TransitionResult};

// Re-export the shared vocabulary for convenience.
pub use cirrus_core::{InstanceId, InstanceState};
