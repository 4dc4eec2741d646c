//! Inbound message decoding.
//!
//! The live-view server sends JSON text frames tagging each display update
//! with one of a fixed set of keys. One frame may carry several updates.
//!
//! # Wire Format
//!
//! ```json
//! { "svg": "<svg>...</svg>", "term": "state A -> B" }
//! ```
//!
//! | Key | Update |
//! |-----|--------|
//! | `svg` | [`DisplayUpdate::Svg`] - replace the visual surface |
//! | `style` | [`DisplayUpdate::Style`] - append a style rule set |
//! | `term` | [`DisplayUpdate::TermLine`] - primary text stream line |
//! | `term2` | [`DisplayUpdate::Term2Line`] - secondary text stream line |
//!
//! Frames that do not decode against this shape take the verbatim fallback
//! path ([`Decoded::Fallback`]) and are rendered as-is on the visual surface.

// ============================================================================
// Submodules
// ============================================================================

/// Display update sum type and frame decoding.
pub mod update;

// ============================================================================
// Re-exports
// ============================================================================

pub use update::{Decoded, DisplayUpdate, decode_frame};
