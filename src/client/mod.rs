//! Reconnecting connection manager.
//!
//! The crate's core: one [`Client`] owns one transport handle, a bounded
//! retry budget and a set of display sinks.
//!
//! # Lifecycle
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Connecting` | a connection attempt is in flight |
//! | `Connected` | the transport is open; payloads flow to the sinks |
//! | `RetryScheduled` | waiting out the linear delay before the next attempt |
//! | `GivenUp` | retry budget exhausted; terminal |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `state` | pure state machine and retry schedule |
//! | `dispatch` | inbound frame routing to sinks |
//! | `manager` | event-loop task and the [`Client`] handle |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound frame routing.
pub mod dispatch;

/// Event loop and client handle.
pub mod manager;

/// Connection state machine.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use dispatch::dispatch_frame;
pub use manager::Client;
pub use state::{ConnectionState, Disposition, ManagerState};
