//! Configuration lifecycle state machine.

use etl_primitives::{ComponentId, StatusCode};
use thiserror::Error;
use tracing::debug;

/// States a configurable component moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    /// No registration has succeeded yet, or the component was deconfigured.
    Unconfigured,
    /// At least one registration returned success or a warning.
    Configured,
    /// Registered sources were applied.
    Applied,
}

impl ConfigState {
    /// Returns `true` for any state other than [`ConfigState::Unconfigured`].
    #[must_use]
    pub const fn is_configured(self) -> bool {
        !matches!(self, Self::Unconfigured)
    }
}

/// Events that trigger lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A registration returned a non-negative status.
    Register,
    /// Registered sources were applied successfully.
    Apply,
    /// Resources were released.
    Deconfigure,
}

/// Lifecycle state manager.
#[derive(Debug, Clone, Copy)]
pub struct Lifecycle {
    component_id: ComponentId,
    state: ConfigState,
}

impl Lifecycle {
    /// Constructs an unconfigured lifecycle for the given component.
    #[must_use]
    pub const fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            state: ConfigState::Unconfigured,
        }
    }

    /// Returns the owning component identifier.
    #[must_use]
    pub const fn component_id(&self) -> ComponentId {
        self.component_id
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> ConfigState {
        self.state
    }

    /// Returns the state `event` would lead to, without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] when the event is not
    /// allowed from the current state.
    pub fn next_state(&self, event: LifecycleEvent) -> LifecycleResult<ConfigState> {
        let next = match (self.state, event) {
            (ConfigState::Unconfigured | ConfigState::Configured, LifecycleEvent::Register) => {
                Some(ConfigState::Configured)
            }
            (ConfigState::Applied, LifecycleEvent::Register)
            | (ConfigState::Configured | ConfigState::Applied, LifecycleEvent::Apply) => {
                Some(ConfigState::Applied)
            }
            (_, LifecycleEvent::Deconfigure) => Some(ConfigState::Unconfigured),
            (ConfigState::Unconfigured, LifecycleEvent::Apply) => None,
        };

        next.ok_or(LifecycleError::InvalidTransition {
            component_id: self.component_id,
            from: self.state,
            event,
        })
    }

    /// Applies a lifecycle event, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] when the event is not
    /// allowed from the current state.
    pub fn transition(&mut self, event: LifecycleEvent) -> LifecycleResult<ConfigState> {
        let next_state = self.next_state(event)?;

        if next_state != self.state {
            debug!(
                component_id = %self.component_id,
                ?self.state,
                ?next_state,
                ?event,
                "configuration lifecycle transition"
            );
            self.state = next_state;
        }

        Ok(self.state)
    }
}

/// Errors emitted by the lifecycle controller.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Transition was not permitted from the current state.
    #[error("invalid configuration transition from {from:?} via {event:?} for component {component_id}")]
    InvalidTransition {
        /// Identifier of the component whose transition failed.
        component_id: ComponentId,
        /// State prior to the attempted transition.
        from: ConfigState,
        /// Event that triggered the failure.
        event: LifecycleEvent,
    },
}

impl LifecycleError {
    /// Status code reported to callers that only deal in codes.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTransition { .. } => StatusCode::NOT_CONFIGURED,
        }
    }
}

/// Result alias used for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
