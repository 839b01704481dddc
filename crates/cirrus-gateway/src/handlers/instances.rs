//! Instance listing and lifecycle endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use cirrus_control::{InstanceControl, InstanceState, InstanceSummary, TransitionResult};
use cirrus_core::InstanceId;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// Response for the instance listing.
#[derive(Debug, Serialize)]
pub struct ListInstancesResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The instances, in provider response order.
    pub data: Vec<InstanceSummary>,
    /// Number of instances returned.
    pub count: usize,
    /// When this listing was taken.
    pub timestamp: DateTime<Utc>,
}

/// Detail block of an accepted transition.
#[derive(Debug, Serialize)]
pub struct TransitionDetail {
    /// The instance that was transitioned.
    pub instance_id: String,
    /// State observed before the transition was issued.
    pub previous_state: InstanceState,
    /// The in-progress state the instance moved to.
    pub current_state: InstanceState,
    /// Why the transition happened.
    pub state_transition_reason: String,
}

/// Response for an accepted transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Transition detail.
    pub data: TransitionDetail,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all instances.
///
/// # Errors
///
/// Returns an error if the provider call fails.
pub async fn list_instances<C>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<impl IntoResponse, ApiError>
where
    C: InstanceControl + 'static,
{
    tracing::info!("fetching instances");
    let instances = state.control.list_instances().await?;

    Ok(Json(ListInstancesResponse {
        success: true,
        count: instances.len(),
        data: instances,
        timestamp: Utc::now(),
    }))
}

/// Stop a running instance.
///
/// # Errors
///
/// Returns an error if the instance is missing, the transition is illegal,
/// or the provider rejects the call.
pub async fn stop_instance<C>(
    State(state): State<Arc<AppState<C>>>,
    Path(instance_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    C: InstanceControl + 'static,
{
    let instance_id = parse_instance_id(&instance_id)?;

    tracing::info!(instance_id = %instance_id, "attempting to stop instance");
    let result = state.control.request_stop(&instance_id).await?;

    match result {
        TransitionResult::Accepted {
            instance_id,
            previous_state,
            current_state,
            reason,
        } => Ok(Json(TransitionResponse {
            success: true,
            message: format!("Instance {instance_id} is stopping"),
            data: TransitionDetail {
                instance_id: instance_id.into_inner(),
                previous_state,
                current_state,
                state_transition_reason: reason,
            },
        })),
        TransitionResult::Rejected { kind, message } => {
            Err(ApiError::from_rejection(&kind, message))
        }
    }
}

/// Start a stopped instance.
///
/// # Errors
///
/// Returns an error if the instance is missing, the transition is illegal,
/// or the provider rejects the call.
pub async fn start_instance<C>(
    State(state): State<Arc<AppState<C>>>,
    Path(instance_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    C: InstanceControl + 'static,
{
    let instance_id = parse_instance_id(&instance_id)?;

    tracing::info!(instance_id = %instance_id, "attempting to start instance");
    let result = state.control.request_start(&instance_id).await?;

    match result {
        TransitionResult::Accepted {
            instance_id,
            previous_state,
            current_state,
            reason,
        } => Ok(Json(TransitionResponse {
            success: true,
            message: format!("Instance {instance_id} is starting"),
            data: TransitionDetail {
                instance_id: instance_id.into_inner(),
                previous_state,
                current_state,
                state_transition_reason: reason,
            },
        })),
        TransitionResult::Rejected { kind, message } => {
            Err(ApiError::from_rejection(&kind, message))
        }
    }
}

/// Validate and wrap the raw path segment.
fn parse_instance_id(raw: &str) -> Result<InstanceId, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingParameter);
    }
    Ok(InstanceId::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_instance_id_is_rejected() {
        assert!(matches!(
            parse_instance_id("   "),
            Err(ApiError::MissingParameter)
        ));
        assert!(matches!(parse_instance_id(""), Err(ApiError::MissingParameter)));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let id = parse_instance_id(" i-123 ").unwrap();
        assert_eq!(id.as_str(), "i-123");
    }
}
