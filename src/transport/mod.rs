//! Transport abstraction.
//!
//! The connection manager depends on a minimal duplex capability set: open a
//! connection to an address, receive payload/error/close events in delivery
//! order, and send text. Anything honoring these semantics can back the
//! client; [`ws`] provides the production WebSocket implementation.
//!
//! # Contract
//!
//! - A successful [`Connector::connect`] is the "opened" event.
//! - [`Transport::next_event`] yields events in the order the connection
//!   delivers them.
//! - Errors eventually surface as [`TransportEvent::Closed`]; a transport
//!   never hangs silently after failing.
//! - A transport handle represents one physical connection attempt and is
//!   never reused after it closes.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `ws` | tokio-tungstenite WebSocket transport |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket transport implementation.
pub mod ws;

// ============================================================================
// Re-exports
// ============================================================================

pub use ws::{WsConnector, WsTransport};

// ============================================================================
// TransportEvent
// ============================================================================

/// An event delivered by an open transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text payload arrived.
    Payload(String),

    /// The connection reported an error. A [`TransportEvent::Closed`]
    /// follows; the error itself is informational.
    Errored(String),

    /// The connection ended. Terminal for this handle.
    Closed,
}

// ============================================================================
// Transport
// ============================================================================

/// One open duplex connection.
#[async_trait]
pub trait Transport: Send {
    /// Waits for the next event on this connection.
    ///
    /// After [`TransportEvent::Closed`] has been returned, every further
    /// call returns `Closed` again.
    async fn next_event(&mut self) -> TransportEvent;

    /// Sends a text payload.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the payload cannot be written. The
    /// failure also surfaces as a close event on the receive side.
    async fn send(&mut self, text: String) -> Result<()>;
}

// ============================================================================
// Connector
// ============================================================================

/// Factory for transport handles.
///
/// The connection manager calls this once per connection attempt; every call
/// produces a fresh handle.
#[async_trait]
pub trait Connector: Send {
    /// Opens a new connection to `url`.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the attempt fails. The manager treats
    /// this the same as a close event on an open connection.
    async fn connect(&mut self, url: &Url) -> Result<Box<dyn Transport>>;
}
