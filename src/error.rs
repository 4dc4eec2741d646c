//! Error types for the live-view client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use viewlink::{Client, Result};
//!
//! fn example() -> Result<()> {
//!     let config = Client::builder().url("ws://localhost:8765").config()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidAddress`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`], [`Error::RetriesExhausted`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |
//!
//! Note that most runtime connectivity failures never reach the caller as
//! errors: close and error events on the transport feed the reconnect
//! schedule instead (see [`crate::client`]). The variants here cover
//! construction-time validation and the terminal give-up condition.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Target address is not a valid WebSocket URL.
    ///
    /// Returned when the address fails to parse or has a non-ws scheme.
    #[error("Invalid address {address:?}: {message}")]
    InvalidAddress {
        /// The offending address string.
        address: String,
        /// Why it was rejected.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Connection attempt failed.
    ///
    /// Returned when a WebSocket connection cannot be established.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection closed and no reconnect is possible.
    ///
    /// Returned from [`crate::Client`](crate::Client) operations after the
    /// manager has terminated.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Retry budget exhausted without a successful open.
    ///
    /// Terminal condition of the reconnect schedule.
    #[error("Max retries reached after {attempts} attempts")]
    RetriesExhausted {
        /// Reconnect attempts consumed before giving up.
        attempts: u32,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid address error.
    #[inline]
    pub fn invalid_address(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a retries-exhausted error.
    #[inline]
    pub fn retries_exhausted(attempts: u32) -> Self {
        Self::RetriesExhausted { attempts }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry; [`Error::RetriesExhausted`]
    /// never is.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::WebSocket(_) | Self::Io(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
