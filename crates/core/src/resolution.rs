//! Incident resolution state machine.
//!
//! An incident is either unresolved or resolved. The only transition is a
//! toggle, valid from either state, and there is no terminal state.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    Unresolved,
    Resolved,
}

impl ResolutionState {
    pub fn from_flag(resolved: bool) -> Self {
        if resolved {
            Self::Resolved
        } else {
            Self::Unresolved
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// The state reached by a toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Unresolved => Self::Resolved,
            Self::Resolved => Self::Unresolved,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unresolved => "Unresolved",
            Self::Resolved => "Resolved",
        }
    }
}

impl From<bool> for ResolutionState {
    fn from(resolved: bool) -> Self {
        Self::from_flag(resolved)
    }
}

/// Error for a guarded toggle whose expectation no longer holds.
///
/// `current` is the flag found in storage when the guard was checked.
pub fn stale_toggle(id: DbId, expected: bool, current: bool) -> CoreError {
    CoreError::Conflict(format!(
        "Incident {id} is already {}; expected it to be {}",
        ResolutionState::from_flag(current).label().to_lowercase(),
        ResolutionState::from_flag(expected).label().to_lowercase(),
    ))
}
