//! Stack lifecycle status
//!
//! ## Transitions
//!
//! ```text
//! (new) ──► CREATE_IN_PROGRESS ──► CREATE_COMPLETE
//! *_COMPLETE | *_FAILED ──► UPDATE_IN_PROGRESS ──► UPDATE_COMPLETE | UPDATE_FAILED
//! *_COMPLETE | *_FAILED ──► DELETE_IN_PROGRESS ──► DELETE_COMPLETE | DELETE_FAILED
//! ```
//!
//! `DELETE_COMPLETE` is terminal. No transition leaves it. `CREATE_FAILED` is
//! reserved and never entered.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a stack or a resource inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackStatus {
    /// Creation has started
    CreateInProgress,
    /// Creation finished
    CreateComplete,
    /// Reserved. Creation is all-or-nothing: a rejected create returns an
    /// error and registers no stack, so no stack ever carries this status.
    /// Kept so status strings round-trip through [`FromStr`](std::str::FromStr).
    CreateFailed,
    /// Update has started
    UpdateInProgress,
    /// Update finished
    UpdateComplete,
    /// Update was rejected; previous resources were restored
    UpdateFailed,
    /// Deletion has started
    DeleteInProgress,
    /// Deletion finished (terminal)
    DeleteComplete,
    /// Teardown was rejected; the stack stays live
    DeleteFailed,
}

impl StackStatus {
    /// Get the wire string, e.g. `CREATE_COMPLETE`
    pub fn as_str(&self) -> &'static str {
        match self {
            StackStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            StackStatus::CreateComplete => "CREATE_COMPLETE",
            StackStatus::CreateFailed => "CREATE_FAILED",
            StackStatus::UpdateInProgress => "UPDATE_IN_PROGRESS",
            StackStatus::UpdateComplete => "UPDATE_COMPLETE",
            StackStatus::UpdateFailed => "UPDATE_FAILED",
            StackStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            StackStatus::DeleteComplete => "DELETE_COMPLETE",
            StackStatus::DeleteFailed => "DELETE_FAILED",
        }
    }

    /// Check if a transition is still running
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            StackStatus::CreateInProgress
                | StackStatus::UpdateInProgress
                | StackStatus::DeleteInProgress
        )
    }

    /// Check if the last transition failed
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            StackStatus::CreateFailed | StackStatus::UpdateFailed | StackStatus::DeleteFailed
        )
    }

    /// Check if the stack has been deleted (terminal)
    pub fn is_deleted(&self) -> bool {
        matches!(self, StackStatus::DeleteComplete)
    }

    /// Check if a new update or delete may start from this status
    pub fn accepts_transition(&self) -> bool {
        !self.is_in_progress() && !self.is_deleted()
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE_IN_PROGRESS" => Ok(StackStatus::CreateInProgress),
            "CREATE_COMPLETE" => Ok(StackStatus::CreateComplete),
            "CREATE_FAILED" => Ok(StackStatus::CreateFailed),
            "UPDATE_IN_PROGRESS" => Ok(StackStatus::UpdateInProgress),
            "UPDATE_COMPLETE" => Ok(StackStatus::UpdateComplete),
            "UPDATE_FAILED" => Ok(StackStatus::UpdateFailed),
            "DELETE_IN_PROGRESS" => Ok(StackStatus::DeleteInProgress),
            "DELETE_COMPLETE" => Ok(StackStatus::DeleteComplete),
            "DELETE_FAILED" => Ok(StackStatus::DeleteFailed),
            other => Err(format!("unknown stack status: {}", other)),
        }
    }
}
