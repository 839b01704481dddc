//! Error types for the lifecycle controller.
//!
//! Business-rule violations never appear here: an illegal transition is a
//! `TransitionResult::Rejected` value. These errors cover only the cases
//! where the controller could not get a usable answer from the provider.

use cirrus_provider::ProviderError;
use thiserror::Error;

/// A result type using `ControlError`.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Exceptional failures of a controller operation.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The provider call failed or produced an unusable answer.
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    /// Any failure not classified above.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}
