//! Cloud provider gateway for the cirrus instance control plane.
//!
//! This crate is the boundary between cirrus and the remote compute
//! provider. It defines:
//!
//! - The [`ComputeProvider`] trait, the handle the lifecycle controller
//!   receives at construction (no process-wide client singletons)
//! - The raw wire types the provider speaks: reservations, instance
//!   records, tags, and the caller identity
//! - The provider error taxonomy: a closed set of known error codes plus a
//!   catch-all for codes cirrus has never seen
//! - [`HttpComputeProvider`], a `reqwest`-based client for the provider's
//!   REST API
//!
//! The provider is the single source of truth for instance state; nothing
//! in this crate caches or persists.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{ComputeProvider, HttpComputeProvider, ProviderConfig};
pub use error::{ProviderError, ProviderErrorCode, Result};
pub use types::{CallerIdentity, InstanceRecord, Reservation, Tag};
