//! API error types and responses.
//!
//! Every failure leaves the gateway as the same JSON envelope:
//! `{ "success": false, "error": <code>, "message": <detail> }`. The code
//! is either one of the controller's stable rejection names or the
//! provider's own code passed through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use cirrus_control::{ControlError, RejectionKind};
use cirrus_provider::ProviderError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The instance id path parameter was missing or blank.
    #[error("Instance ID is required")]
    MissingParameter,

    /// The instance does not exist at the provider.
    #[error("{0}")]
    NotFound(String),

    /// The requested transition is illegal for the current state.
    #[error("{message}")]
    BadTransition {
        /// Rejection code (`AlreadyInTargetState` or `IncorrectState`).
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// The provider denied authorization for the call.
    #[error("{message}")]
    Forbidden {
        /// The provider's authorization error code.
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// The provider rejected the call for an unanticipated reason.
    #[error("{message}")]
    Provider {
        /// The provider's error code, passed through verbatim.
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// Any failure not classified above.
    #[error("An unexpected error occurred")]
    Internal,
}

/// Error response envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter | Self::BadTransition { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Provider { .. } | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MissingParameter => "MissingParameter",
            Self::NotFound(_) => "InstanceNotFound",
            Self::BadTransition { code, .. }
            | Self::Forbidden { code, .. }
            | Self::Provider { code, .. } => code,
            Self::Internal => "InternalServerError",
        }
    }

    /// Translate a controller rejection into the matching API error.
    #[must_use]
    pub fn from_rejection(kind: &RejectionKind, message: String) -> Self {
        match kind {
            RejectionKind::InstanceNotFound => Self::NotFound(message),
            RejectionKind::AlreadyInTargetState | RejectionKind::IncorrectState => {
                Self::BadTransition {
                    code: kind.code().to_string(),
                    message,
                }
            }
            RejectionKind::Provider(code) if code.is_authorization() => Self::Forbidden {
                code: code.as_str().to_string(),
                message,
            },
            RejectionKind::Provider(code) => Self::Provider {
                code: code.as_str().to_string(),
                message,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: self.code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::Provider(ProviderError::Api { code, message }) => {
                if code.is_authorization() {
                    Self::Forbidden {
                        code: code.as_str().to_string(),
                        message,
                    }
                } else {
                    Self::Provider {
                        code: code.as_str().to_string(),
                        message,
                    }
                }
            }
            ControlError::Provider(err) => {
                tracing::error!(error = %err, "provider failure");
                Self::Internal
            }
            ControlError::Unexpected(msg) => {
                tracing::error!(error = %msg, "unexpected error");
                Self::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_provider::ProviderErrorCode;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::MissingParameter.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadTransition {
                code: "IncorrectState".into(),
                message: "no".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Forbidden {
                code: "AuthFailure".into(),
                message: "no".into()
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejection_mapping() {
        let err = ApiError::from_rejection(&RejectionKind::InstanceNotFound, "gone".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "InstanceNotFound");

        let err = ApiError::from_rejection(&RejectionKind::AlreadyInTargetState, "noop".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "AlreadyInTargetState");

        let err = ApiError::from_rejection(
            &RejectionKind::Provider(ProviderErrorCode::UnauthorizedOperation),
            "denied".into(),
        );
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "UnauthorizedOperation");

        let err = ApiError::from_rejection(
            &RejectionKind::Provider(ProviderErrorCode::Other("RequestLimitExceeded".into())),
            "slow down".into(),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "RequestLimitExceeded");
    }

    #[test]
    fn transport_failures_are_internal() {
        let err: ApiError =
            ControlError::Provider(ProviderError::Transport("connect refused".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "InternalServerError");
    }

    #[test]
    fn auth_failure_from_error_channel_is_forbidden() {
        let err: ApiError = ControlError::Provider(ProviderError::api(
            "AuthFailure",
            "credentials rejected",
        ))
        .into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "AuthFailure");
    }
}
