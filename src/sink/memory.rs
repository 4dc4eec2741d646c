//! In-memory buffer sinks.
//!
//! Cloneable surfaces backed by shared buffers. Hand one clone to the client
//! inside a [`super::SinkSet`] and keep another to inspect what was
//! delivered. Used by the crate's own tests and useful for headless
//! consumers that poll display state instead of rendering it.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;

use super::{StyleSink, TextSink, VisualSink};

// ============================================================================
// TextBuffer
// ============================================================================

/// Text stream sink that records every write.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    writes: Arc<Mutex<Vec<String>>>,
}

impl TextBuffer {
    /// Creates an empty buffer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all writes in delivery order.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    /// Returns the concatenated stream content.
    #[must_use]
    pub fn contents(&self) -> String {
        self.writes.lock().concat()
    }

    /// Discards recorded writes.
    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl TextSink for TextBuffer {
    fn write(&mut self, text: &str) {
        self.writes.lock().push(text.to_string());
    }
}

// ============================================================================
// SurfaceBuffer
// ============================================================================

/// Visual surface sink that keeps the latest content.
#[derive(Debug, Clone, Default)]
pub struct SurfaceBuffer {
    state: Arc<Mutex<SurfaceState>>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    content: Option<String>,
    replacements: usize,
}

impl SurfaceBuffer {
    /// Creates an empty surface.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current content, if any replacement happened yet.
    #[must_use]
    pub fn content(&self) -> Option<String> {
        self.state.lock().content.clone()
    }

    /// Returns how many replacements were delivered.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.state.lock().replacements
    }
}

impl VisualSink for SurfaceBuffer {
    fn replace(&mut self, content: &str) {
        let mut state = self.state.lock();
        state.content = Some(content.to_string());
        state.replacements += 1;
    }
}

// ============================================================================
// StyleBuffer
// ============================================================================

/// Style surface sink that accumulates appended rule sets.
#[derive(Debug, Clone, Default)]
pub struct StyleBuffer {
    rules: Arc<Mutex<Vec<String>>>,
}

impl StyleBuffer {
    /// Creates an empty style surface.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all appended rule sets in order.
    #[must_use]
    pub fn rules(&self) -> Vec<String> {
        self.rules.lock().clone()
    }
}

impl StyleSink for StyleBuffer {
    fn append(&mut self, rules: &str) {
        self.rules.lock().push(rules.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================
