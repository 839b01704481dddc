//! Raw wire types spoken by the provider API.
//!
//! These mirror the provider's nested response shapes. Flattening the
//! reservation grouping and substituting display sentinels is the
//! controller's job, not this crate's.

use chrono::{DateTime, Utc};
use cirrus_core::{InstanceId, InstanceState};
use serde::{Deserialize, Serialize};

/// A key/value tag attached to an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key, unique within an instance.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// A single instance as described by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Provider-assigned identifier.
    pub instance_id: InstanceId,
    /// Provider SKU string (e.g. `"t3.micro"`).
    pub instance_type: String,
    /// Point-in-time lifecycle state.
    pub state: InstanceState,
    /// When the instance was launched.
    pub launch_time: DateTime<Utc>,
    /// Public network address, if assigned.
    #[serde(default)]
    pub public_ip: Option<String>,
    /// Private network address, if assigned.
    #[serde(default)]
    pub private_ip: Option<String>,
    /// Tags in provider order. Absent on untagged instances.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// The provider's reservation grouping around instances.
///
/// Bulk describes return instances nested under reservations; the grouping
/// carries no meaning for cirrus beyond preserving provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Provider-assigned reservation identifier.
    pub reservation_id: String,
    /// Instances in this reservation, in provider order.
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
}

/// The identity the provider resolved for our credentials.
///
/// Fetched once at startup so the operator can see which principal the
/// service is acting as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Provider account identifier.
    pub account: String,
    /// Full principal name.
    pub arn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_with_absent_optionals() {
        let json = r#"{
            "instance_id": "i-123",
            "instance_type": "t3.micro",
            "state": "running",
            "launch_time": "2026-03-01T12:00:00Z"
        }"#;

        let record: InstanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.instance_id.as_str(), "i-123");
        assert_eq!(record.state, InstanceState::Running);
        assert!(record.public_ip.is_none());
        assert!(record.private_ip.is_none());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn reservation_decodes_nested_instances() {
        let json = r#"{
            "reservation_id": "r-1",
            "instances": [
                {
                    "instance_id": "i-1",
                    "instance_type": "t3.micro",
                    "state": "stopped",
                    "launch_time": "2026-03-01T12:00:00Z",
                    "tags": [{"key": "Name", "value": "web-1"}]
                }
            ]
        }"#;

        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.instances.len(), 1);
        assert_eq!(reservation.instances[0].tags[0].key, "Name");
    }
}
