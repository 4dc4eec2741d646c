//! Routing of inbound frames to display sinks.
//!
//! One frame can carry several updates; each present key dispatches
//! independently to its surface. Text lines are trimmed of trailing
//! whitespace and terminated with CRLF before delivery. Frames that fail to
//! decode are rendered verbatim on the visual surface.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace};

use crate::protocol::{Decoded, DisplayUpdate, decode_frame};
use crate::sink::SinkSet;

// ============================================================================
// Dispatch
// ============================================================================

/// Decodes one raw frame and delivers its updates to the sinks.
pub fn dispatch_frame(raw: &str, sinks: &mut SinkSet) {
    match decode_frame(raw) {
        Decoded::Updates(updates) => {
            trace!(count = updates.len(), "Dispatching updates");
            for update in updates {
                apply_update(update, sinks);
            }
        }

        Decoded::Fallback(payload) => {
            debug!(len = payload.len(), "Undecodable frame, rendering verbatim");
            sinks.visual.replace(&payload);
        }
    }
}

/// Delivers a single update to its surface, applying text transforms.
fn apply_update(update: DisplayUpdate, sinks: &mut SinkSet) {
    match update {
        DisplayUpdate::Svg(content) => sinks.visual.replace(&content),
        DisplayUpdate::Style(rules) => sinks.style.append(&rules),
        DisplayUpdate::TermLine(line) => sinks.term.write(&text_line(&line)),
        DisplayUpdate::Term2Line(line) => sinks.term2.write(&text_line(&line)),
    }
}

/// Trims trailing whitespace and appends CRLF.
#[inline]
fn text_line(line: &str) -> String {
    format!("{}\r\n", line.trim_end())
}

// ============================================================================
// Tests
// ============================================================================
