//! Result and projection types for controller operations.
//!
//! These types are the controller's upward contract: plain values with no
//! HTTP vocabulary in them. The request handler decides what status codes
//! and envelopes they become.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use cirrus_core::{InstanceId, InstanceState};
use cirrus_provider::{InstanceRecord, ProviderErrorCode};
use serde::Serialize;

use crate::lifecycle::Direction;

/// Sentinel used where the provider reported no network address.
pub const ADDRESS_UNASSIGNED: &str = "N/A";

/// A single requested transition. Created per command, consumed once.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    /// The instance to transition.
    pub instance_id: InstanceId,
    /// The requested direction.
    pub desired: Direction,
}

impl TransitionRequest {
    /// Build a stop request.
    #[must_use]
    pub fn stop(instance_id: impl Into<InstanceId>) -> Self {
        Self {
            instance_id: instance_id.into(),
            desired: Direction::Stop,
        }
    }

    /// Build a start request.
    #[must_use]
    pub fn start(instance_id: impl Into<InstanceId>) -> Self {
        Self {
            instance_id: instance_id.into(),
            desired: Direction::Start,
        }
    }
}

/// Why a transition was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    /// The instance id does not exist at the provider. Terminal.
    InstanceNotFound,
    /// The transition is a no-op given the current state.
    AlreadyInTargetState,
    /// The current state cannot legally move in the requested direction.
    IncorrectState,
    /// The provider rejected the call for an unanticipated reason; the
    /// provider's code passes through intact.
    Provider(ProviderErrorCode),
}

impl RejectionKind {
    /// The caller-visible code string for this rejection.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InstanceNotFound => "InstanceNotFound",
            Self::AlreadyInTargetState => "AlreadyInTargetState",
            Self::IncorrectState => "IncorrectState",
            Self::Provider(code) => code.as_str(),
        }
    }
}

/// The outcome of a transition request: exactly one of accepted or rejected.
#[derive(Debug, Clone)]
pub enum TransitionResult {
    /// The transition was legal and has been submitted to the provider.
    Accepted {
        /// The instance that was transitioned.
        instance_id: InstanceId,
        /// The state observed before the transition was issued.
        previous_state: InstanceState,
        /// The provider's canonical in-progress state for the direction
        /// (`stopping` for a stop, `pending` for a start) - never the
        /// eventual terminal state.
        current_state: InstanceState,
        /// Why the transition happened.
        reason: String,
    },
    /// The transition was illegal, or the provider reported failure.
    Rejected {
        /// The rejection classification.
        kind: RejectionKind,
        /// Human-readable detail.
        message: String,
    },
}

impl TransitionResult {
    /// Build a rejection.
    #[must_use]
    pub fn rejected(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// True if the transition was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// One instance as presented by the listing operation.
///
/// Constructed fresh from a point-in-time provider read on every call,
/// never cached, and discarded once the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceSummary {
    /// Provider-assigned identifier.
    pub id: InstanceId,
    /// Provider SKU string.
    #[serde(rename = "type")]
    pub instance_type: String,
    /// Point-in-time lifecycle state.
    pub state: InstanceState,
    /// Region the gateway is bound to. Informational.
    pub region: String,
    /// When the instance was launched.
    pub launch_time: DateTime<Utc>,
    /// Public address, or `"N/A"` when unassigned.
    pub public_ip: String,
    /// Private address, or `"N/A"` when unassigned.
    pub private_ip: String,
    /// Tags, unordered. Empty for untagged instances.
    pub tags: HashMap<String, String>,
}

impl InstanceSummary {
    /// Project a raw provider record into a summary.
    #[must_use]
    pub fn from_record(record: InstanceRecord, region: &str) -> Self {
        Self {
            id: record.instance_id,
            instance_type: record.instance_type,
            state: record.state,
            region: region.to_string(),
            launch_time: record.launch_time,
            public_ip: record
                .public_ip
                .unwrap_or_else(|| ADDRESS_UNASSIGNED.to_string()),
            private_ip: record
                .private_ip
                .unwrap_or_else(|| ADDRESS_UNASSIGNED.to_string()),
            tags: record
                .tags
                .into_iter()
                .map(|tag| (tag.key, tag.value))
                .collect(),
        }
    }
}
