use crate::event::DatabaseEvent;
use crate::types::{EventCallback, EventGuard, HookOutcome};
use std::sync::Arc;

/// Signal manager for delete notifications
pub struct SignalManager {
    guards: std::sync::RwLock<Vec<EventGuard>>,
    callbacks: std::sync::RwLock<Vec<EventCallback>>,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("guard_count", &self.guard_count())
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self {
            guards: std::sync::RwLock::new(Vec::new()),
            callbacks: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Add event callback
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&DatabaseEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.push(Arc::new(callback));
        }
    }

    /// Add a guard consulted before deletes, in registration order
    pub fn add_guard<F>(&self, guard: F)
    where
        F: Fn(&DatabaseEvent) -> HookOutcome + Send + Sync + 'static,
    {
        if let Ok(mut guards) = self.guards.write() {
            guards.push(Arc::new(guard));
        }
    }

    /// Run guards for a before-event, then notify callbacks.
    ///
    /// The first guard returning `Stop` wins; later guards and callbacks
    /// are not invoked. After-events skip the guards. Guards and callbacks
    /// run on a snapshot taken without holding the lock, so they may
    /// register or clear handlers themselves.
    pub fn dispatch(&self, event: DatabaseEvent) -> HookOutcome {
        if event.is_before() {
            for guard in self.guards_snapshot() {
                let outcome = guard(&event);
                if outcome.is_stopped() {
                    tracing::debug!(
                        "[SIGNAL] {} on {} stopped by guard",
                        event.event_type.as_str(),
                        event.table_name
                    );
                    return outcome;
                }
            }
        }

        self.emit(event);
        HookOutcome::Proceed
    }

    /// Emit event to all subscribers
    pub fn emit(&self, event: DatabaseEvent) {
        for callback in self.callbacks_snapshot() {
            callback(&event);
        }
    }

    fn guards_snapshot(&self) -> Vec<EventGuard> {
        self.guards.read().map(|g| g.clone()).unwrap_or_default()
    }

    fn callbacks_snapshot(&self) -> Vec<EventCallback> {
        self.callbacks.read().map(|c| c.clone()).unwrap_or_default()
    }

    /// Clear all guards and callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut guards) = self.guards.write() {
            guards.clear();
        }
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Get number of registered guards
    pub fn guard_count(&self) -> usize {
        self.guards.read().map(|g| g.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}
