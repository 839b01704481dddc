//! Transition validation predicates.
//!
//! This module defines which lifecycle transitions are legal given an
//! instance's current observed state.
//!
//! # Transition rules
//!
//! ```text
//!   stop:   running ──▶ stopping          (only a running instance stops)
//!   start:  stopped ──▶ pending
//!           stopping ──▶ pending          (a still-stopping instance may
//!                                          be started again)
//! ```
//!
//! Everything else is denied: asking to stop a stopped instance (or start
//! a running one) is a no-op and reported as such; any other state cannot
//! legally move in the requested direction.
//!
//! Starting from `stopping` is intentionally permissive. The provider
//! accepts a start for an instance that has not finished stopping, and the
//! controller mirrors that rather than tightening it locally.

use std::fmt;

use cirrus_core::InstanceState;

/// The direction of a requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Stop a running instance.
    Stop,
    /// Start a stopped (or still-stopping) instance.
    Start,
}

impl Direction {
    /// The provider's canonical in-progress state for this direction.
    ///
    /// This is the state an accepted transition reports as current; the
    /// controller never waits for the terminal state.
    #[must_use]
    pub const fn pending_state(self) -> InstanceState {
        match self {
            Self::Stop => InstanceState::Stopping,
            Self::Start => InstanceState::Pending,
        }
    }

    /// The state in which this transition is already satisfied.
    #[must_use]
    pub const fn settled_state(self) -> InstanceState {
        match self {
            Self::Stop => InstanceState::Stopped,
            Self::Start => InstanceState::Running,
        }
    }

    /// The transition reason recorded on acceptance.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Stop => "User initiated stop",
            Self::Start => "User initiated start",
        }
    }

    /// Past participle for message wording ("stopped" / "started").
    #[must_use]
    pub const fn participle(self) -> &'static str {
        match self {
            Self::Stop => "stopped",
            Self::Start => "started",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stop => "stop",
            Self::Start => "start",
        })
    }
}

/// Why a transition was denied by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDenial {
    /// The instance is already in the state the transition would reach.
    AlreadyInTargetState,
    /// The current state cannot legally move in the requested direction.
    IncorrectState,
}

/// Check whether `current` may legally transition in `direction`.
///
/// # Errors
///
/// Returns the denial reason if the transition is not allowed.
pub const fn check_transition(
    direction: Direction,
    current: InstanceState,
) -> Result<(), TransitionDenial> {
    match direction {
        Direction::Stop => match current {
            InstanceState::Running => Ok(()),
            InstanceState::Stopped => Err(TransitionDenial::AlreadyInTargetState),
            _ => Err(TransitionDenial::IncorrectState),
        },
        Direction::Start => match current {
            InstanceState::Stopped | InstanceState::Stopping => Ok(()),
            InstanceState::Running => Err(TransitionDenial::AlreadyInTargetState),
            _ => Err(TransitionDenial::IncorrectState),
        },
    }
}

/// True if an instance in `state` may be stopped.
#[must_use]
pub const fn is_stoppable(state: InstanceState) -> bool {
    matches!(state, InstanceState::Running)
}

/// True if an instance in `state` may be started.
#[must_use]
pub const fn is_startable(state: InstanceState) -> bool {
    matches!(state, InstanceState::Stopped | InstanceState::Stopping)
}
