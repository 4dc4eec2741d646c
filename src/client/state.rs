//! Connection state machine and retry schedule.
//!
//! Pure state: every transition is a typed method with no IO, so the retry
//! budget invariant is checkable in isolation from the event loop that
//! drives it.
//!
//! # Transitions
//!
//! ```text
//! Connecting ──opened──► Connected
//!     │                      │
//!     └──────disconnected────┘
//!                │
//!      budget left?  ──yes──► RetryScheduled ──retry_elapsed──► Connecting
//!                │                                  (decrements budget)
//!                └───no───► GivenUp (terminal)
//! ```
//!
//! # Retry delay
//!
//! The n-th retry (1-indexed) waits `base_delay * n`: linear growth, chosen
//! over exponential backoff for a low-volume control connection where total
//! wall-clock growth should stay bounded and predictable.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle phase of the connection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A connection attempt is in flight.
    Connecting,
    /// The transport is open.
    Connected,
    /// Waiting out the delay before the next attempt.
    RetryScheduled,
    /// Retry budget exhausted. Terminal.
    GivenUp,
}

// ============================================================================
// Disposition
// ============================================================================

/// Outcome of a disconnect: what the event loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Sleep for `delay`, then call [`ManagerState::retry_elapsed`] and
    /// reconnect.
    Retry {
        /// Computed linear delay for this attempt.
        delay: Duration,
        /// Budget remaining before this attempt is consumed.
        retries_left: u32,
    },
    /// No budget left; the manager terminates.
    GiveUp {
        /// Total reconnect attempts consumed.
        attempts: u32,
    },
}

// ============================================================================
// ManagerState
// ============================================================================

/// Connection lifecycle state plus retry budget.
///
/// Invariants:
///
/// - `retries_left` is reset to `max_retries` exactly on [`Self::opened`]
/// - `retries_left` is decremented exactly once per
///   [`Self::retry_elapsed`], which only follows a `Retry` disposition
#[derive(Debug, Clone)]
pub struct ManagerState {
    state: ConnectionState,
    max_retries: u32,
    retries_left: u32,
    base_delay: Duration,
}

impl ManagerState {
    /// Creates the initial state: `Connecting` with a full budget.
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            state: ConnectionState::Connecting,
            max_retries,
            retries_left: max_retries,
            base_delay,
        }
    }

    /// Returns the current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` while the transport is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Returns the remaining retry budget.
    #[inline]
    #[must_use]
    pub fn retries_left(&self) -> u32 {
        self.retries_left
    }

    /// Returns how many attempts have been consumed since the last open.
    #[inline]
    #[must_use]
    pub fn attempts_consumed(&self) -> u32 {
        self.max_retries - self.retries_left
    }

    /// A connection attempt succeeded: `Connecting -> Connected`.
    ///
    /// Restores the full retry budget, so a later failure sequence starts
    /// over.
    pub fn opened(&mut self) {
        debug_assert_eq!(self.state, ConnectionState::Connecting);
        self.state = ConnectionState::Connected;
        self.retries_left = self.max_retries;
    }

    /// The transport closed or a connection attempt failed.
    ///
    /// From `Connecting` or `Connected`. With budget left the manager moves
    /// to `RetryScheduled` and the returned disposition carries the delay
    /// for the upcoming attempt; otherwise it moves to the terminal
    /// `GivenUp`.
    pub fn disconnected(&mut self) -> Disposition {
        debug_assert!(matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Connected
        ));

        if self.retries_left > 0 {
            self.state = ConnectionState::RetryScheduled;
            Disposition::Retry {
                delay: self.next_delay(),
                retries_left: self.retries_left,
            }
        } else {
            self.state = ConnectionState::GivenUp;
            Disposition::GiveUp {
                attempts: self.max_retries,
            }
        }
    }

    /// The scheduled delay elapsed: `RetryScheduled -> Connecting`.
    ///
    /// Consumes one unit of budget. This is the only place the budget is
    /// decremented.
    pub fn retry_elapsed(&mut self) {
        debug_assert_eq!(self.state, ConnectionState::RetryScheduled);
        debug_assert!(self.retries_left > 0);
        self.state = ConnectionState::Connecting;
        self.retries_left -= 1;
    }

    /// Delay before the next attempt: `base_delay * attempt_number`.
    ///
    /// Computed before the budget decrement, so the first retry waits one
    /// base unit and each subsequent retry one more.
    fn next_delay(&self) -> Duration {
        self.base_delay * (self.max_retries - self.retries_left + 1)
    }
}

// ============================================================================
// Tests
// ============================================================================
