//! Provider error taxonomy.
//!
//! The provider reports failures as an opaque `(code, message)` pair. The
//! codes cirrus makes decisions on are modeled as a closed enum; every code
//! it has never seen survives untouched in [`ProviderErrorCode::Other`] so
//! it can be passed through to callers verbatim.

use std::fmt;

use thiserror::Error;

/// A result type using `ProviderError`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// A provider error code.
///
/// The known variants are the codes the control plane branches on; any
/// other code round-trips through [`ProviderErrorCode::Other`] with its
/// wire string intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// The instance id does not exist at the provider.
    InstanceNotFound,
    /// The provider rejected the credentials.
    AuthFailure,
    /// The credentials are valid but not permitted to perform the call.
    UnauthorizedOperation,
    /// Any code cirrus does not recognize.
    Other(String),
}

impl ProviderErrorCode {
    /// Classify a wire code string.
    #[must_use]
    pub fn from_wire(code: &str) -> Self {
        match code {
            "InvalidInstanceID.NotFound" => Self::InstanceNotFound,
            "AuthFailure" => Self::AuthFailure,
            "UnauthorizedOperation" => Self::UnauthorizedOperation,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire string for this code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InstanceNotFound => "InvalidInstanceID.NotFound",
            Self::AuthFailure => "AuthFailure",
            Self::UnauthorizedOperation => "UnauthorizedOperation",
            Self::Other(code) => code,
        }
    }

    /// True for codes that mean the caller is not allowed to do this,
    /// as opposed to the call itself being malformed or the provider
    /// being unhealthy.
    #[must_use]
    pub const fn is_authorization(&self) -> bool {
        matches!(self, Self::AuthFailure | Self::UnauthorizedOperation)
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by the provider gateway.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered the call with an error payload.
    #[error("provider error {code}: {message}")]
    Api {
        /// The provider's error code, preserved verbatim.
        code: ProviderErrorCode,
        /// The provider's human-readable message.
        message: String,
    },

    /// The call never produced a provider answer (connect failure, timeout).
    #[error("provider transport failure: {0}")]
    Transport(String),

    /// The provider answered with a body cirrus could not decode.
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Build an `Api` error from a wire code and message.
    #[must_use]
    pub fn api(code: &str, message: impl Into<String>) -> Self {
        Self::Api {
            code: ProviderErrorCode::from_wire(code),
            message: message.into(),
        }
    }

    /// True if this is the provider's not-found answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                code: ProviderErrorCode::InstanceNotFound,
                ..
            }
        )
    }
}
