//! Client configuration and builder.
//!
//! Provides a fluent API for configuring the live-view client before
//! connecting.
//!
//! # Example
//!
//! ```
//! use viewlink::ClientConfig;
//!
//! # fn example() -> viewlink::Result<()> {
//! let config = ClientConfig::builder()
//!     .url("ws://localhost:8765")
//!     .max_retries(5)
//!     .retry_delay_ms(2000)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default reconnect attempt budget.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default base retry delay in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

// ============================================================================
// ClientConfig
// ============================================================================

/// Validated configuration for a live-view client.
///
/// Immutable for the lifetime of the client that consumes it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Target WebSocket endpoint.
    pub url: Url,
    /// Reconnect attempt budget.
    pub max_retries: u32,
    /// Base unit of the linear retry schedule.
    pub retry_delay: Duration,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for [`ClientConfig`].
///
/// Use [`ClientConfig::builder()`] or [`crate::Client::builder()`] to create
/// a new builder.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// Target endpoint, unvalidated until build.
    url: Option<String>,
    /// Reconnect attempt budget.
    max_retries: u32,
    /// Base retry delay.
    retry_delay: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            url: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new builder with default retry settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target WebSocket address.
    ///
    /// # Arguments
    ///
    /// * `url` - Endpoint address (e.g., "ws://localhost:8765")
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the reconnect attempt budget.
    ///
    /// A budget of 0 means the first failure is terminal.
    #[inline]
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base retry delay.
    ///
    /// The n-th retry waits `retry_delay * n`.
    #[inline]
    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Sets the base retry delay in milliseconds.
    #[inline]
    #[must_use]
    pub fn retry_delay_ms(mut self, millis: u64) -> Self {
        self.retry_delay = Duration::from_millis(millis);
        self
    }

    /// Builds the configuration with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no url was set
    /// - [`Error::InvalidAddress`] if the url does not parse or has a
    ///   scheme other than `ws`/`wss`
    pub fn build(self) -> Result<ClientConfig> {
        let url = self.validate_url()?;

        Ok(ClientConfig {
            url,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
        })
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Validates the target address.
    fn validate_url(&self) -> Result<Url> {
        let raw = self.url.clone().ok_or_else(|| {
            Error::config(
                "Target address is required. Use .url() to set it.\n\
                 Example: Client::builder().url(\"ws://localhost:8765\")",
            )
        })?;

        let url =
            Url::parse(&raw).map_err(|e| Error::invalid_address(&raw, e.to_string()))?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(Error::invalid_address(
                &raw,
                format!("scheme must be ws or wss, got {other}"),
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
