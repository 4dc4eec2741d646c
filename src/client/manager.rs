//! Connection manager event loop and client handle.
//!
//! The manager owns one transport handle at a time and runs on a single
//! spawned task. Every transition is a reaction to a transport event or to
//! the retry timer; no two connection attempts are ever in flight at once
//! because a new attempt is only issued after the scheduled delay completes.
//!
//! # Event Loop
//!
//! ```text
//! loop {
//!     connect ──ok──► opened: reset budget, notify
//!     │                  │
//!     │                  ▼ drive: payloads -> sinks, sends -> transport
//!     └──err──┐          │ until Closed
//!             ▼          ▼
//!         disconnected: retry after linear delay, or give up
//! }
//! ```
//!
//! Lifecycle notifications go to the tracing log and are mirrored as status
//! lines on the primary text sink, so an operator watching the display sees
//! connection state changes inline with the stream.

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::{ClientBuilder, ClientConfig};
use crate::error::Result;
use crate::sink::SinkSet;
use crate::transport::{Connector, Transport, TransportEvent, WsConnector};

use super::dispatch::dispatch_frame;
use super::state::{ConnectionState, Disposition, ManagerState};

// ============================================================================
// Command
// ============================================================================

/// Commands from the client handle to the event loop.
enum Command {
    /// Forward a payload on the active transport.
    Send(String),
}

// ============================================================================
// Client
// ============================================================================

/// Handle to a running connection manager.
///
/// Cheap to clone. The manager task keeps running after every handle is
/// dropped, until it reaches [`ConnectionState::GivenUp`] or the runtime
/// shuts down; there is no explicit cancel operation.
#[derive(Debug, Clone)]
pub struct Client {
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ConnectionState>,
}

impl Client {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Connects using the WebSocket transport.
    ///
    /// Spawns the manager task; the first connection attempt starts
    /// immediately. Must be called within a tokio runtime.
    #[must_use]
    pub fn connect(config: ClientConfig, sinks: SinkSet) -> Self {
        Self::connect_with(config, sinks, WsConnector::new())
    }

    /// Connects using a custom [`Connector`].
    #[must_use]
    pub fn connect_with(
        config: ClientConfig,
        sinks: SinkSet,
        connector: impl Connector + 'static,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let state = ManagerState::new(config.max_retries, config.retry_delay);
        let (state_tx, state_rx) = watch::channel(state.state());

        let manager = Manager {
            config,
            connector: Box::new(connector),
            sinks,
            state,
            command_rx,
            commands_open: true,
            state_tx,
        };

        tokio::spawn(manager.run());

        Self {
            command_tx,
            state_rx,
        }
    }

    /// Returns the manager's current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Returns `true` while the transport is open.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Forwards a payload on the active transport.
    ///
    /// Sending while disconnected is an expected transient condition, not an
    /// error: the payload is dropped with a warning. Callers that need
    /// certainty can check [`Self::is_connected`] first.
    pub fn send(&self, data: impl Into<String>) {
        if !self.is_connected() {
            warn!("Cannot send payload: not connected");
            return;
        }

        if self.command_tx.send(Command::Send(data.into())).is_err() {
            warn!("Cannot send payload: manager terminated");
        }
    }

    /// Waits until the manager reaches the terminal
    /// [`ConnectionState::GivenUp`] state.
    pub async fn until_given_up(&self) {
        let mut state_rx = self.state_rx.clone();

        while *state_rx.borrow_and_update() != ConnectionState::GivenUp {
            if state_rx.changed().await.is_err() {
                return;
            }
        }
    }
}

// ============================================================================
// ClientBuilder Connect
// ============================================================================

impl ClientBuilder {
    /// Builds the configuration and connects with the WebSocket transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails; see
    /// [`ClientBuilder::build`].
    pub fn connect(self, sinks: SinkSet) -> Result<Client> {
        let config = self.build()?;
        Ok(Client::connect(config, sinks))
    }
}

// ============================================================================
// Manager
// ============================================================================

/// The event-loop side of a client. Owned by its spawned task.
struct Manager {
    config: ClientConfig,
    connector: Box<dyn Connector>,
    sinks: SinkSet,
    state: ManagerState,
    command_rx: mpsc::UnboundedReceiver<Command>,
    commands_open: bool,
    state_tx: watch::Sender<ConnectionState>,
}

impl Manager {
    /// Runs connection attempts until the retry budget is exhausted.
    async fn run(mut self) {
        loop {
            self.publish();

            match self.connector.connect(&self.config.url).await {
                Ok(mut transport) => {
                    self.state.opened();
                    self.publish();
                    info!(url = %self.config.url, "Connected");
                    self.status("connected");

                    self.drive(transport.as_mut()).await;

                    info!("Connection closed");
                    self.status("connection closed");
                }

                Err(e) => {
                    warn!(error = %e, "Connection attempt failed");
                    self.status("connection error");
                }
            }

            match self.state.disconnected() {
                Disposition::Retry {
                    delay,
                    retries_left,
                } => {
                    self.publish();
                    info!(
                        delay_ms = delay.as_millis() as u64,
                        retries_left, "Retry scheduled"
                    );
                    self.status(&format!(
                        "retrying in {:.1}s... ({retries_left} attempts left)",
                        delay.as_secs_f64()
                    ));

                    sleep(delay).await;
                    self.state.retry_elapsed();
                }

                Disposition::GiveUp { attempts } => {
                    self.publish();
                    warn!(attempts, "Max retries reached, giving up");
                    self.status("max retries reached");
                    break;
                }
            }
        }
    }

    /// Drives one open transport until it closes.
    async fn drive(&mut self, transport: &mut dyn Transport) {
        loop {
            tokio::select! {
                event = transport.next_event() => match event {
                    TransportEvent::Payload(text) => {
                        dispatch_frame(&text, &mut self.sinks);
                    }

                    TransportEvent::Errored(message) => {
                        error!(message = %message, "Transport error");
                        self.status("connection error");
                    }

                    TransportEvent::Closed => break,
                },

                command = self.command_rx.recv(), if self.commands_open => match command {
                    Some(Command::Send(data)) => {
                        if let Err(e) = transport.send(data).await {
                            warn!(error = %e, "Failed to send payload");
                        }
                    }

                    // All handles dropped; keep driving the connection.
                    None => self.commands_open = false,
                },
            }
        }
    }

    /// Publishes the current lifecycle state to handles.
    fn publish(&self) {
        let _ = self.state_tx.send(self.state.state());
    }

    /// Mirrors a lifecycle notification on the primary text sink.
    fn status(&mut self, line: &str) {
        self.sinks.term.write(&format!("{line}\r\n"));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::time::Instant;
    use url::Url;

    use crate::error::Error;
    use crate::sink::BufferedSinks;

    const BASE: Duration = Duration::from_millis(100);

    // ========================================================================
    // Scripted transport
    // ========================================================================

    /// One scripted connection attempt.
    enum Attempt {
        Fail,
        Open(ScriptedTransport),
    }

    struct ScriptedTransport {
        events: mpsc::UnboundedReceiver<TransportEvent>,
        sent: Arc<Mutex<Vec<String>>>,
        closed: bool,
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn next_event(&mut self) -> TransportEvent {
            if self.closed {
                return TransportEvent::Closed;
            }

            match self.events.recv().await {
                Some(TransportEvent::Closed) | None => {
                    self.closed = true;
                    TransportEvent::Closed
                }
                Some(event) => event,
            }
        }

        async fn send(&mut self, text: String) -> crate::Result<()> {
            self.sent.lock().push(text);
            Ok(())
        }
    }

    struct ScriptedConnector {
        attempts: VecDeque<Attempt>,
        opens: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&mut self, _url: &Url) -> crate::Result<Box<dyn Transport>> {
            self.opens.fetch_add(1, Ordering::SeqCst);

            match self.attempts.pop_front() {
                Some(Attempt::Open(transport)) => Ok(Box::new(transport)),
                Some(Attempt::Fail) | None => Err(Error::connection("scripted failure")),
            }
        }
    }

    // ========================================================================
    // Harness
    // ========================================================================

    struct Harness {
        client: Client,
        buffers: BufferedSinks,
        opens: Arc<AtomicUsize>,
    }

    fn config(max_retries: u32) -> ClientConfig {
        ClientConfig::builder()
            .url("ws://localhost:8765")
            .max_retries(max_retries)
            .retry_delay(BASE)
            .build()
            .expect("valid config")
    }

    fn start(max_retries: u32, attempts: Vec<Attempt>) -> Harness {
        let opens = Arc::new(AtomicUsize::new(0));
        let connector = ScriptedConnector {
            attempts: attempts.into(),
            opens: Arc::clone(&opens),
        };

        let (sinks, buffers) = SinkSet::buffered();
        let client = Client::connect_with(config(max_retries), sinks, connector);

        Harness {
            client,
            buffers,
            opens,
        }
    }

    /// An attempt that opens and replays `events`, then closes.
    fn open_replaying(events: Vec<TransportEvent>) -> Attempt {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            tx.send(event).expect("channel open");
        }
        // Sender drops here; the transport closes after the replay.

        Attempt::Open(ScriptedTransport {
            events: rx,
            sent: Arc::new(Mutex::new(Vec::new())),
            closed: false,
        })
    }

    /// An attempt that stays open until the returned sender is dropped.
    fn open_held() -> (
        Attempt,
        mpsc::UnboundedSender<TransportEvent>,
        Arc<Mutex<Vec<String>>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));

        let attempt = Attempt::Open(ScriptedTransport {
            events: rx,
            sent: Arc::clone(&sent),
            closed: false,
        });

        (attempt, tx, sent)
    }

    /// Polls `condition` under the paused clock, letting timers fire.
    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..10_000 {
            if condition() {
                return;
            }
            sleep(Duration::from_millis(1)).await;
        }
        panic!("condition not reached");
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let h = start(2, vec![Attempt::Fail, Attempt::Fail, Attempt::Fail]);

        h.client.until_given_up().await;

        // Initial attempt plus exactly max_retries reconnects.
        assert_eq!(h.opens.load(Ordering::SeqCst), 3);
        assert_eq!(h.client.state(), ConnectionState::GivenUp);

        // Terminal: no further attempts even as time passes.
        sleep(BASE * 100).await;
        assert_eq!(h.opens.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_first_failure_terminal() {
        let h = start(0, vec![Attempt::Fail]);

        h.client.until_given_up().await;

        assert_eq!(h.opens.load(Ordering::SeqCst), 1);
        assert_eq!(h.client.state(), ConnectionState::GivenUp);
        assert!(!h.client.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_delays_sum_linearly() {
        // Under the paused clock, elapsed time is exactly the slept time:
        // base*1 + base*2 + base*3.
        let h = start(3, vec![]);
        let started = Instant::now();

        h.client.until_given_up().await;

        assert_eq!(started.elapsed(), BASE * 6);
        assert_eq!(h.opens.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_open_restores_budget() {
        // Fail once, open briefly, then fail repeatedly: the reconnect after
        // the open gets the full budget again.
        let h = start(
            2,
            vec![Attempt::Fail, open_replaying(vec![]), Attempt::Fail, Attempt::Fail],
        );

        h.client.until_given_up().await;

        // 1 initial + 1 retry (open) + 2 full-budget retries after the open.
        assert_eq!(h.opens.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payloads_dispatch_to_sinks() {
        let h = start(
            0,
            vec![open_replaying(vec![
                TransportEvent::Payload(r#"{"term": "hello   "}"#.into()),
                TransportEvent::Payload(r#"{"svg": "<rect/>", "style": ".x{}"}"#.into()),
                TransportEvent::Payload("plain text".into()),
            ])],
        );

        h.client.until_given_up().await;

        assert!(h.buffers.term.writes().contains(&"hello\r\n".to_string()));
        assert_eq!(h.buffers.style.rules(), vec![".x{}".to_string()]);
        // The fallback frame replaced the svg content afterwards.
        assert_eq!(h.buffers.visual.content(), Some("plain text".into()));
        assert_eq!(h.buffers.visual.replacements(), 2);
        assert!(h.buffers.term2.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_delivers_only_while_connected() {
        let (attempt, held, sent) = open_held();
        let h = start(1, vec![Attempt::Fail, attempt]);

        // Manager has not run yet: state is Connecting, payload is dropped.
        assert!(!h.client.is_connected());
        h.client.send("early");

        wait_until(|| h.client.is_connected()).await;
        h.client.send("late");

        wait_until(|| !sent.lock().is_empty()).await;
        assert_eq!(sent.lock().clone(), vec!["late".to_string()]);

        drop(held);
        h.client.until_given_up().await;

        // Terminal state: send is again a silent no-op.
        h.client.send("after");
        assert_eq!(sent.lock().clone(), vec!["late".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connected_notification_and_reset() {
        let (attempt, held, _sent) = open_held();
        let h = start(3, vec![attempt]);

        wait_until(|| h.client.is_connected()).await;
        assert_eq!(h.client.state(), ConnectionState::Connected);
        assert!(h.buffers.term.writes().contains(&"connected\r\n".to_string()));

        drop(held);
        h.client.until_given_up().await;

        // The budget was full when the open connection dropped.
        assert_eq!(h.opens.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_event_noted_then_closes() {
        let h = start(
            0,
            vec![open_replaying(vec![TransportEvent::Errored("boom".into())])],
        );

        h.client.until_given_up().await;

        let lines = h.buffers.term.writes();
        assert!(lines.contains(&"connected\r\n".to_string()));
        assert!(lines.contains(&"connection error\r\n".to_string()));
        assert!(lines.contains(&"connection closed\r\n".to_string()));
        assert!(lines.contains(&"max retries reached\r\n".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_countdown_status_line() {
        let h = start(1, vec![]);

        h.client.until_given_up().await;

        let lines = h.buffers.term.writes();
        assert!(
            lines.contains(&"retrying in 0.1s... (1 attempts left)\r\n".to_string()),
            "missing countdown in {lines:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_processed_in_order() {
        let h = start(
            0,
            vec![open_replaying(vec![
                TransportEvent::Payload(r#"{"term": "one"}"#.into()),
                TransportEvent::Payload(r#"{"term": "two"}"#.into()),
                TransportEvent::Payload(r#"{"term": "three"}"#.into()),
            ])],
        );

        h.client.until_given_up().await;

        let lines: Vec<String> = h
            .buffers
            .term
            .writes()
            .into_iter()
            .filter(|l| ["one\r\n", "two\r\n", "three\r\n"].contains(&l.as_str()))
            .collect();
        assert_eq!(lines, vec!["one\r\n", "two\r\n", "three\r\n"]);
    }
}
