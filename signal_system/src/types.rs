//! Type definitions for signal system
//!
//! Callback signatures and the outcome a before-delete guard reports.

use crate::event::DatabaseEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Observer notified of every dispatched event
pub type EventCallback = Arc<dyn Fn(&DatabaseEvent) + Send + Sync>;

/// Guard consulted for before-delete events
pub type EventGuard = Arc<dyn Fn(&DatabaseEvent) -> HookOutcome + Send + Sync>;

/// What a guard decided about the pending operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HookOutcome {
    /// Continue with the delete
    #[default]
    Proceed,
    /// Abort; the caller receives `result` instead of the delete outcome
    Stop { result: bool },
}

impl HookOutcome {
    pub fn stop(result: bool) -> Self {
        HookOutcome::Stop { result }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, HookOutcome::Stop { .. })
    }

    /// The short-circuit value, if the operation was stopped
    pub fn short_circuit_result(&self) -> Option<bool> {
        match self {
            HookOutcome::Proceed => None,
            HookOutcome::Stop { result } => Some(*result),
        }
    }
}
