//! Instance lifecycle states.
//!
//! The vocabulary mirrors the provider's: an instance moves through
//! `pending` → `running` → `stopping` → `stopped`, and terminally through
//! `shutting-down` → `terminated`. Only `running`, `stopped`, and
//! `stopping` matter for transition decisions; the rest exist so that
//! listing and validation can name every state the provider reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The lifecycle state of an instance, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    /// The instance is being provisioned after a start request.
    Pending,
    /// The instance is up.
    Running,
    /// A stop has been issued and is in progress.
    Stopping,
    /// The instance is stopped and can be started again.
    Stopped,
    /// The instance is being terminated.
    ShuttingDown,
    /// The instance has been terminated and will never run again.
    Terminated,
}

impl InstanceState {
    /// The provider's wire name for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "stopping" => Ok(Self::Stopping),
            "stopped" => Ok(Self::Stopped),
            "shutting-down" => Ok(Self::ShuttingDown),
            "terminated" => Ok(Self::Terminated),
            other => Err(ParseStateError(other.to_string())),
        }
    }
}

/// Error returned when a state string is not part of the provider vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instance state: {0}")]
pub struct ParseStateError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for state in [
            InstanceState::Pending,
            InstanceState::Running,
            InstanceState::Stopping,
            InstanceState::Stopped,
            InstanceState::ShuttingDown,
            InstanceState::Terminated,
        ] {
            assert_eq!(state.as_str().parse::<InstanceState>().unwrap(), state);
        }
    }

    #[test]
    fn unknown_state_is_an_error() {
        let err = "rebooting".parse::<InstanceState>().unwrap_err();
        assert_eq!(err, ParseStateError("rebooting".to_string()));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&InstanceState::ShuttingDown).unwrap();
        assert_eq!(json, "\"shutting-down\"");

        let state: InstanceState = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(state, InstanceState::Running);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(InstanceState::Stopping.to_string(), "stopping");
    }
}
