//! Signal system for delete notifications
//!
//! This crate provides the before/after-delete events of the SoftHaus
//! ecosystem and the guards that may cancel a pending delete.

pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use event::{DatabaseEvent, EventType};
pub use manager::SignalManager;
pub use types::{EventCallback, EventGuard, HookOutcome};
