//! viewlink - Resilient WebSocket live-view client.
//!
//! This library maintains a persistent connection to a live-view server,
//! re-establishes it automatically after failures using a bounded linear
//! retry schedule, and routes the server's tagged display updates to
//! injected output sinks.
//!
//! # Architecture
//!
//! - One [`Client`] owns: a single transport handle + retry budget + event loop
//! - At most one connection attempt is ever in flight; reconnects replace
//!   the old handle, never reuse it
//! - Display surfaces are injected capabilities ([`SinkSet`]), not ambient
//!   globals; the client knows nothing about the UI toolkit behind them
//! - Inbound frames decode into a closed [`DisplayUpdate`] sum type;
//!   undecodable frames render verbatim on the visual surface
//!
//! # Quick Start
//!
//! ```no_run
//! use viewlink::{Client, Result, SinkSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Buffered sinks keep the display state readable from outside
//!     let (sinks, buffers) = SinkSet::buffered();
//!
//!     let client = Client::builder()
//!         .url("ws://localhost:8765")
//!         .max_retries(5)
//!         .retry_delay_ms(2000)
//!         .connect(sinks)?;
//!
//!     // Runs until the retry budget is exhausted
//!     client.until_given_up().await;
//!     println!("final view: {:?}", buffers.visual.content());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Reconnecting connection manager and [`Client`] handle |
//! | [`config`] | Client configuration and builder |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | Inbound frame decoding (internal wire shape) |
//! | [`sink`] | Display sink capabilities and buffer implementations |
//! | [`transport`] | Transport abstraction and WebSocket implementation |
//!
//! # Failure Model
//!
//! No failure here is fatal to the hosting process. Transient connectivity
//! loss feeds the retry schedule; malformed frames take the verbatim
//! fallback path; sending while disconnected is a logged no-op. The single
//! terminal condition is an exhausted retry budget.

// ============================================================================
// Modules
// ============================================================================

/// Reconnecting connection manager.
///
/// The crate's state-machine core: [`Client`], [`ConnectionState`] and the
/// retry schedule.
pub mod client;

/// Client configuration.
///
/// Use [`Client::builder()`] to configure and connect.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Inbound frame decoding.
///
/// Wire-shape module defining the closed display-update sum type.
pub mod protocol;

/// Display sink capabilities.
///
/// Traits for the surfaces the client dispatches to, plus in-memory
/// implementations.
pub mod sink;

/// Transport abstraction.
///
/// Internal seam between the manager and the WebSocket layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{Client, ConnectionState};

// Configuration types
pub use config::{ClientBuilder, ClientConfig};

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{Decoded, DisplayUpdate};

// Sink types
pub use sink::{BufferedSinks, SinkSet, StyleSink, TextSink, VisualSink};

// Transport types
pub use transport::{Connector, Transport, TransportEvent};
