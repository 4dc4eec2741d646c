//! Display sink capabilities.
//!
//! The client never reaches into a concrete UI toolkit. Instead it is
//! constructed with a [`SinkSet`]: one capability object per output surface,
//! injected by the display collaborator.
//!
//! # Surfaces
//!
//! | Trait | Surface | Delivery |
//! |-------|---------|----------|
//! | [`VisualSink`] | primary visual surface | replace entire content |
//! | [`StyleSink`] | document-wide style surface | append rule set |
//! | [`TextSink`] | text stream (primary and secondary) | append |
//!
//! Sinks are called from the client's event-loop task, one call at a time;
//! implementations do not need internal synchronization beyond being `Send`.

// ============================================================================
// Submodules
// ============================================================================

/// In-memory buffer sinks for tests and headless use.
pub mod memory;

// ============================================================================
// Re-exports
// ============================================================================

pub use memory::{StyleBuffer, SurfaceBuffer, TextBuffer};

// ============================================================================
// Sink Traits
// ============================================================================

/// Primary visual surface: whole-content replacement.
pub trait VisualSink: Send {
    /// Replaces the entire surface content.
    fn replace(&mut self, content: &str);
}

/// Document-wide style surface: rule sets accumulate.
pub trait StyleSink: Send {
    /// Appends a new rule set.
    fn append(&mut self, rules: &str);
}

/// Append-only text stream.
///
/// The client delivers complete lines, already trimmed of trailing
/// whitespace and terminated with CRLF.
pub trait TextSink: Send {
    /// Appends text to the stream.
    fn write(&mut self, text: &str);
}

// ============================================================================
// SinkSet
// ============================================================================

/// The full set of output surfaces a client dispatches to.
pub struct SinkSet {
    /// Primary visual surface.
    pub visual: Box<dyn VisualSink>,
    /// Style surface.
    pub style: Box<dyn StyleSink>,
    /// Primary text stream; also receives connection status lines.
    pub term: Box<dyn TextSink>,
    /// Secondary text stream.
    pub term2: Box<dyn TextSink>,
}

impl SinkSet {
    /// Bundles the four surfaces into a set.
    #[must_use]
    pub fn new(
        visual: impl VisualSink + 'static,
        style: impl StyleSink + 'static,
        term: impl TextSink + 'static,
        term2: impl TextSink + 'static,
    ) -> Self {
        Self {
            visual: Box::new(visual),
            style: Box::new(style),
            term: Box::new(term),
            term2: Box::new(term2),
        }
    }

    /// A set backed entirely by in-memory buffers.
    ///
    /// Returns the set together with the buffers, which stay readable after
    /// the set is handed to a client.
    #[must_use]
    pub fn buffered() -> (Self, BufferedSinks) {
        let visual = SurfaceBuffer::new();
        let style = StyleBuffer::new();
        let term = TextBuffer::new();
        let term2 = TextBuffer::new();

        let buffers = BufferedSinks {
            visual: visual.clone(),
            style: style.clone(),
            term: term.clone(),
            term2: term2.clone(),
        };

        (Self::new(visual, style, term, term2), buffers)
    }
}

impl std::fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkSet").finish_non_exhaustive()
    }
}

// ============================================================================
// BufferedSinks
// ============================================================================

/// Read handles for a [`SinkSet::buffered`] set.
#[derive(Debug, Clone)]
pub struct BufferedSinks {
    /// Visual surface buffer.
    pub visual: SurfaceBuffer,
    /// Style surface buffer.
    pub style: StyleBuffer,
    /// Primary text stream buffer.
    pub term: TextBuffer,
    /// Secondary text stream buffer.
    pub term2: TextBuffer,
}

// ============================================================================
// Tests
// ============================================================================
