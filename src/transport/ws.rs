//! WebSocket transport backed by tokio-tungstenite.
//!
//! Maps the WebSocket frame stream onto the [`TransportEvent`] contract:
//! text frames become payloads, close frames and stream end become
//! [`TransportEvent::Closed`], stream errors surface once as
//! [`TransportEvent::Errored`] and then close. Binary, ping and pong frames
//! are handled by the protocol layer and ignored here.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};

use super::{Connector, Transport, TransportEvent};

// ============================================================================
// Types
// ============================================================================

/// The underlying stream type produced by `connect_async`.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// WsConnector
// ============================================================================

/// Opens WebSocket connections with `connect_async`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl WsConnector {
    /// Creates the connector.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&mut self, url: &Url) -> Result<Box<dyn Transport>> {
        let (stream, response) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::connection(e.to_string()))?;

        debug!(url = %url, status = %response.status(), "WebSocket handshake completed");

        Ok(Box::new(WsTransport::new(stream)))
    }
}

// ============================================================================
// WsTransport
// ============================================================================

/// One open WebSocket connection.
pub struct WsTransport {
    /// Outgoing half.
    write: SplitSink<WsStream, Message>,
    /// Incoming half.
    read: SplitStream<WsStream>,
    /// Set once the stream has ended; later polls return `Closed`.
    closed: bool,
}

impl WsTransport {
    /// Wraps an established WebSocket stream.
    #[must_use]
    pub fn new(stream: WsStream) -> Self {
        let (write, read) = stream.split();
        Self {
            write,
            read,
            closed: false,
        }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn next_event(&mut self) -> TransportEvent {
        if self.closed {
            return TransportEvent::Closed;
        }

        loop {
            match self.read.next().await {
                Some(Ok(Message::Text(text))) => {
                    trace!(len = text.len(), "Text frame received");
                    return TransportEvent::Payload(text.to_string());
                }

                Some(Ok(Message::Close(_))) | None => {
                    debug!("WebSocket closed");
                    self.closed = true;
                    return TransportEvent::Closed;
                }

                Some(Err(e)) => {
                    self.closed = true;
                    return TransportEvent::Errored(e.to_string());
                }

                // Ignore Binary, Ping, Pong, Frame
                _ => {}
            }
        }
    }

    async fn send(&mut self, text: String) -> Result<()> {
        self.write.send(Message::Text(text.into())).await?;
        Ok(())
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
