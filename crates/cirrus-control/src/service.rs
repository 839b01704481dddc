//! The lifecycle controller service.
//!
//! This module provides the [`InstanceControl`] trait consumed by the
//! request handler, and [`LifecycleController`], its provider-backed
//! implementation.
//!
//! Every operation is a fresh read-validate-act cycle: describe the
//! instance, check the requested transition against the observed state,
//! and fire the provider mutation if the check passes. The two-step
//! protocol exists because the provider's mutation calls do not say *why*
//! a transition is illegal; validating locally produces precise, stable
//! rejection kinds instead of leaking raw provider errors for predictable
//! cases.
//!
//! Concurrent requests for the same instance are not coordinated here: two
//! simultaneous stops may both observe `running` and both issue a stop.
//! The provider treats the duplicate mutation as a no-op, so the race is
//! benign.

use std::sync::Arc;

use async_trait::async_trait;
use cirrus_core::InstanceId;
use cirrus_provider::{ComputeProvider, ProviderError, ProviderErrorCode};

use crate::error::Result;
use crate::lifecycle::{self, Direction, TransitionDenial};
use crate::types::{InstanceSummary, RejectionKind, TransitionRequest, TransitionResult};

/// The controller's upward contract: the operations the request handler
/// calls, free of HTTP vocabulary.
#[async_trait]
pub trait InstanceControl: Send + Sync {
    /// Request that an instance be stopped.
    ///
    /// # Errors
    ///
    /// Returns an error only for exceptional provider failures (transport,
    /// malformed responses). Illegal transitions and provider-reported
    /// rejections come back as [`TransitionResult::Rejected`].
    async fn request_stop(&self, instance_id: &InstanceId) -> Result<TransitionResult>;

    /// Request that an instance be started.
    ///
    /// # Errors
    ///
    /// Same contract as [`InstanceControl::request_stop`].
    async fn request_start(&self, instance_id: &InstanceId) -> Result<TransitionResult>;

    /// List every instance as a flat sequence of summaries, in provider
    /// response order.
    ///
    /// # Errors
    ///
    /// Fails only by propagating a provider failure; there is nothing to
    /// validate, so there are no rejection cases.
    async fn list_instances(&self) -> Result<Vec<InstanceSummary>>;
}

/// Provider-backed lifecycle controller.
///
/// Holds no state of its own beyond the provider handle; the provider is
/// the single source of truth and every call re-reads it.
pub struct LifecycleController<P: ComputeProvider> {
    provider: Arc<P>,
}

impl<P: ComputeProvider> LifecycleController<P> {
    /// Create a controller over the given provider gateway.
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// The provider handle this controller acts through.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Classify a provider failure into the result vocabulary.
    ///
    /// Not-found and provider-reported rejections are normal outcomes and
    /// go to the value channel; transport and decode failures are
    /// exceptional and propagate as errors.
    fn classify(instance_id: &InstanceId, err: ProviderError) -> Result<TransitionResult> {
        match err {
            ProviderError::Api {
                code: ProviderErrorCode::InstanceNotFound,
                ..
            } => Ok(TransitionResult::rejected(
                RejectionKind::InstanceNotFound,
                format!("Instance {instance_id} not found"),
            )),
            ProviderError::Api { code, message } => {
                Ok(TransitionResult::rejected(RejectionKind::Provider(code), message))
            }
            other => Err(other.into()),
        }
    }

    /// The shared describe-validate-mutate skeleton for both directions.
    async fn apply(&self, request: TransitionRequest) -> Result<TransitionResult> {
        let TransitionRequest {
            instance_id,
            desired,
        } = request;

        let record = match self.provider.describe_instance(&instance_id).await {
            Ok(record) => record,
            Err(err) => {
                let result = Self::classify(&instance_id, err)?;
                if let TransitionResult::Rejected { kind, .. } = &result {
                    tracing::warn!(
                        instance_id = %instance_id,
                        direction = %desired,
                        code = kind.code(),
                        "transition rejected before validation"
                    );
                }
                return Ok(result);
            }
        };

        let previous_state = record.state;

        if let Err(denial) = lifecycle::check_transition(desired, previous_state) {
            let (kind, message) = match denial {
                TransitionDenial::AlreadyInTargetState => (
                    RejectionKind::AlreadyInTargetState,
                    format!(
                        "Instance {instance_id} is already {}",
                        desired.settled_state()
                    ),
                ),
                TransitionDenial::IncorrectState => (
                    RejectionKind::IncorrectState,
                    format!(
                        "Instance {instance_id} is not in a state that can be {}",
                        desired.participle()
                    ),
                ),
            };

            tracing::warn!(
                instance_id = %instance_id,
                direction = %desired,
                state = %previous_state,
                code = kind.code(),
                "transition rejected"
            );
            return Ok(TransitionResult::rejected(kind, message));
        }

        // Fire and forget: the provider reports completion on its own time.
        let mutation = match desired {
            Direction::Stop => self.provider.stop_instance(&instance_id).await,
            Direction::Start => self.provider.start_instance(&instance_id).await,
        };

        if let Err(err) = mutation {
            // The instance can vanish between describe and mutate; that is
            // still a not-found rejection, not a server failure.
            return Self::classify(&instance_id, err);
        }

        tracing::info!(
            instance_id = %instance_id,
            direction = %desired,
            previous_state = %previous_state,
            "transition accepted"
        );

        Ok(TransitionResult::Accepted {
            instance_id,
            previous_state,
            current_state: desired.pending_state(),
            reason: desired.reason().to_string(),
        })
    }
}

#[async_trait]
impl<P: ComputeProvider + 'static> InstanceControl for LifecycleController<P> {
    async fn request_stop(&self, instance_id: &InstanceId) -> Result<TransitionResult> {
        self.apply(TransitionRequest::stop(instance_id.clone())).await
    }

    async fn request_start(&self, instance_id: &InstanceId) -> Result<TransitionResult> {
        self.apply(TransitionRequest::start(instance_id.clone())).await
    }

    async fn list_instances(&self) -> Result<Vec<InstanceSummary>> {
        let reservations = self.provider.describe_all_instances().await?;
        let region = self.provider.region();

        let summaries: Vec<InstanceSummary> = reservations
            .into_iter()
            .flat_map(|reservation| reservation.instances)
            .map(|record| InstanceSummary::from_record(record, region))
            .collect();

        tracing::info!(count = summaries.len(), "listed instances");
        Ok(summaries)
    }
}
