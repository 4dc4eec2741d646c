//! Frame decoding and dispatch without a server.
//!
//! Demonstrates:
//! - The closed display-update sum type
//! - Dispatch transforms (trailing trim, CRLF) and the verbatim fallback
//! - Reading delivered state back from buffered sinks
//!
//! Usage:
//!   cargo run --example buffered_sinks

// ============================================================================
// Imports
// ============================================================================

use viewlink::client::dispatch_frame;
use viewlink::protocol::decode_frame;
use viewlink::SinkSet;

// ============================================================================
// Main
// ============================================================================

fn main() {
    println!("=== buffered_sinks ===\n");

    let (mut sinks, buffers) = SinkSet::buffered();

    // ========================================================================
    // Decode
    // ========================================================================

    println!("[1] Decoding frames...");

    let frames = [
        r#"{"style": "body { background-color: #303030; }"}"#,
        r#"{"svg": "<svg><rect/></svg>", "term": "A -> B : t0   "}"#,
        r#"{"term": "B -> C : t1", "term2": "state C"}"#,
        "not json at all",
    ];

    for frame in &frames {
        println!("    {:?}", decode_frame(frame));
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    println!("\n[2] Dispatching to buffered sinks...");

    for frame in &frames {
        dispatch_frame(frame, &mut sinks);
    }

    println!("    ✓ {} frames dispatched\n", frames.len());

    // ========================================================================
    // Inspect
    // ========================================================================

    println!("[3] Delivered state:");
    println!("    visual:  {:?}", buffers.visual.content());
    println!("    replaced {} times", buffers.visual.replacements());
    println!("    styles:  {:?}", buffers.style.rules());
    println!("    term:    {:?}", buffers.term.writes());
    println!("    term2:   {:?}", buffers.term2.writes());
}
