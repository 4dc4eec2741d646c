//! Live-view client against a running server.
//!
//! Demonstrates:
//! - Configuring a client with url, retry budget and base delay
//! - Implementing the sink traits over stdout
//! - Watching the connection survive server restarts
//!
//! Usage:
//!   cargo run --example live_view
//!   cargo run --example live_view -- ws://localhost:8765

// ============================================================================
// Imports
// ============================================================================

use anyhow::Result;
use viewlink::{Client, SinkSet, StyleSink, TextSink, VisualSink};

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_URL: &str = "ws://localhost:8765";

// ============================================================================
// Stdout Sinks
// ============================================================================

/// Text stream printed with a stream label.
struct StdoutStream {
    label: &'static str,
}

impl TextSink for StdoutStream {
    fn write(&mut self, text: &str) {
        print!("[{}] {}", self.label, text.replace("\r\n", "\n"));
    }
}

/// Visual surface reported as a size only; SVG bodies are large.
struct StdoutSurface;

impl VisualSink for StdoutSurface {
    fn replace(&mut self, content: &str) {
        println!("[svg] surface replaced ({} bytes)", content.len());
    }
}

/// Style surface printed verbatim.
struct StdoutStyles;

impl StyleSink for StdoutStyles {
    fn append(&mut self, rules: &str) {
        println!("[style] {rules}");
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewlink=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.into());

    println!("=== live_view ===\n");
    println!("[1] Connecting to {url}...");

    let sinks = SinkSet::new(
        StdoutSurface,
        StdoutStyles,
        StdoutStream { label: "term" },
        StdoutStream { label: "term2" },
    );

    let client = Client::builder()
        .url(url)
        .max_retries(5)
        .retry_delay_ms(2000)
        .connect(sinks)?;

    println!("    ✓ Client running (stop the server to watch the retry schedule)\n");

    client.until_given_up().await;

    println!("\n=== retry budget exhausted, exiting ===");
    Ok(())
}
