//! WebSocket transport for the client.
//!
//! Provides [`Transport`], which owns at most one connection at a time. Each
//! connection runs on its own task that bridges the socket and two queues:
//! outbound frames in, session events out. Protocol logic stays in
//! `parley-proto`; this layer only moves text.
//!
//! # Event stream
//!
//! Per connection the stream is: zero or more decoded events, then exactly
//! one terminal event (`Closed` or `Error`). After the terminal event the
//! connection is released and [`Transport::next_event`] yields `None` until
//! the next [`Transport::connect`].

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures_util::{SinkExt, StreamExt};
use parley_proto::{Command, ServerMessage, SessionEvent, WIRE_VERSION};
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream,
    tungstenite::{
        self, Message,
        client::IntoClientRequest,
        handshake::client::Request,
        http::{HeaderValue, header::SEC_WEBSOCKET_PROTOCOL},
    },
};

use crate::{TransportConfig, TransportError};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// State shared between the adapter and one connection task.
struct Connection {
    outbound: mpsc::Sender<String>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    open: Arc<AtomicBool>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

/// WebSocket transport adapter.
///
/// All methods return immediately; outcomes arrive later through
/// [`next_event`](Transport::next_event).
pub struct Transport {
    config: TransportConfig,
    connection: Option<Connection>,
}

impl Transport {
    /// Create an idle transport.
    pub fn new(config: TransportConfig) -> Self {
        Self { config, connection: None }
    }

    /// Configuration in use.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Whether a connection has completed its handshake and not yet ended.
    pub fn is_open(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| c.open.load(Ordering::Acquire))
    }

    /// Start connecting to `endpoint`.
    ///
    /// A non-empty `auth_token` is presented once, as the
    /// `Sec-WebSocket-Protocol` header of the upgrade request. Must be
    /// called from within a Tokio runtime.
    pub fn connect(&mut self, endpoint: &str, auth_token: &str) {
        if let Some(previous) = self.connection.take() {
            tracing::warn!(endpoint, "connect while a connection is live; dropping it");
            if let Some(task) = previous.task {
                task.abort();
            }
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::channel(self.config.outbound_capacity.max(1));
        let open = Arc::new(AtomicBool::new(false));

        let mut connection = Connection {
            outbound: outbound_tx,
            events: events_rx,
            open: Arc::clone(&open),
            shutdown: None,
            task: None,
        };

        match build_request(endpoint, auth_token) {
            Ok(request) => {
                let (shutdown_tx, shutdown_rx) = oneshot::channel();
                connection.shutdown = Some(shutdown_tx);
                connection.task = Some(tokio::spawn(run_connection(
                    request,
                    outbound_rx,
                    shutdown_rx,
                    open,
                    events_tx,
                )));
            },
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "cannot build upgrade request");
                let _ = events_tx.send(SessionEvent::Error { detail: e.to_string() });
            },
        }

        self.connection = Some(connection);
    }

    /// Encode `command` and queue it for the server.
    ///
    /// Discarded unless the connection is open. Local and lifecycle commands
    /// have no wire form and are ignored.
    pub fn send(&self, command: &Command) {
        let Some(connection) = self.connection.as_ref().filter(|c| c.open.load(Ordering::Acquire))
        else {
            tracing::debug!(?command, "not connected; command discarded");
            return;
        };

        let text = match self.encode(command) {
            Ok(Some(text)) => text,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "outbound frame dropped");
                return;
            },
        };

        match connection.outbound.try_send(text) {
            Ok(()) => {},
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    capacity = self.config.outbound_capacity,
                    "outbound queue full; frame dropped"
                );
            },
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("connection task gone; frame dropped");
            },
        }
    }

    /// Ask the connection task to close the socket.
    ///
    /// The task answers with `Closed`. Frames still queued are dropped.
    pub fn disconnect(&mut self) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        if let Some(shutdown) = connection.shutdown.take() {
            tracing::debug!("disconnect requested");
            let _ = shutdown.send(());
        }
    }

    /// Next event in arrival order.
    ///
    /// Returns `None` when there is no connection. Cancel safe.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let connection = self.connection.as_mut()?;
        let event = connection.events.recv().await;
        if event.as_ref().is_none_or(SessionEvent::is_terminal) {
            self.connection = None;
        }
        event
    }

    fn encode(&self, command: &Command) -> Result<Option<String>, TransportError> {
        let Some(message) = command.to_client_message() else {
            return Ok(None);
        };
        let text = message.to_frame()?.encode_within(self.config.max_frame_size)?;
        Ok(Some(text))
    }
}

impl Drop for Transport {
    /// Closes a live connection with a proper close handshake. The task
    /// finishes on its own; its terminal event has no reader.
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn build_request(endpoint: &str, auth_token: &str) -> Result<Request, TransportError> {
    let mut request = endpoint
        .into_client_request()
        .map_err(|source| TransportError::InvalidEndpoint { endpoint: endpoint.to_owned(), source })?;

    if !auth_token.is_empty() {
        request.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_str(auth_token)?);
    }

    Ok(request)
}

/// Run one connection from handshake to terminal event.
async fn run_connection(
    request: Request,
    outbound: mpsc::Receiver<String>,
    mut shutdown: oneshot::Receiver<()>,
    open: Arc<AtomicBool>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let uri = request.uri().to_string();

    let handshake = tokio::select! {
        _ = &mut shutdown => None,
        result = tokio_tungstenite::connect_async(request) => Some(result),
    };

    let terminal = match handshake {
        None => {
            tracing::debug!(%uri, "disconnected during handshake");
            SessionEvent::Closed
        },
        Some(Ok((socket, _response))) => {
            open.store(true, Ordering::Release);
            tracing::info!(%uri, wire_version = WIRE_VERSION, "websocket open");
            io_loop(socket, outbound, shutdown, &events).await
        },
        Some(Err(e)) => {
            tracing::warn!(%uri, error = %e, "websocket handshake failed");
            SessionEvent::Error { detail: format!("connect to {uri} failed: {e}") }
        },
    };

    open.store(false, Ordering::Release);
    tracing::debug!(event = terminal.name(), "connection finished");
    let _ = events.send(terminal);
}

/// Pump frames both ways until the connection ends.
///
/// Returns the terminal event.
async fn io_loop(
    socket: Socket,
    mut outbound: mpsc::Receiver<String>,
    mut shutdown: oneshot::Receiver<()>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) -> SessionEvent {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Err(e) = sink.close().await {
                    tracing::debug!(error = %e, "close handshake failed");
                }
                return SessionEvent::Closed;
            },
            Some(text) = outbound.recv() => {
                tracing::trace!(bytes = text.len(), "frame out");
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    return terminal_for(e);
                }
            },
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => deliver(text.as_str(), events),
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => deliver(text, events),
                    Err(e) => reject(format!("binary frame is not UTF-8: {e}"), events),
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "server closed connection");
                    return SessionEvent::Closed;
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => return terminal_for(e),
                None => return SessionEvent::Closed,
            },
        }
    }
}

/// Decode one inbound frame into one event.
fn deliver(text: &str, events: &mpsc::UnboundedSender<SessionEvent>) {
    match ServerMessage::decode(text) {
        Ok(message) => {
            let event = message.into_event();
            tracing::trace!(event = event.name(), "frame in");
            let _ = events.send(event);
        },
        Err(e) => reject(e.to_string(), events),
    }
}

fn reject(detail: String, events: &mpsc::UnboundedSender<SessionEvent>) {
    tracing::warn!(%detail, "inbound frame rejected");
    let _ = events.send(SessionEvent::FrameRejected { detail });
}

fn terminal_for(error: tungstenite::Error) -> SessionEvent {
    match error {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
            SessionEvent::Closed
        },
        other => {
            tracing::warn!(error = %other, "connection failed");
            SessionEvent::Error { detail: other.to_string() }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_token_as_subprotocol() {
        let request = build_request("ws://localhost:8080/ws", "secret").unwrap();
        assert_eq!(request.headers().get(SEC_WEBSOCKET_PROTOCOL).unwrap(), "secret");
    }

    #[test]
    fn empty_token_sends_no_subprotocol() {
        let request = build_request("ws://localhost:8080/ws", "").unwrap();
        assert!(request.headers().get(SEC_WEBSOCKET_PROTOCOL).is_none());
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let err = build_request("not a url", "secret").unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint { .. }));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = build_request("ws://localhost:8080/ws", "bad\ntoken").unwrap_err();
        assert!(matches!(err, TransportError::InvalidToken(_)));
    }

    #[test]
    fn oversized_chat_is_not_encoded() {
        let transport = Transport::new(TransportConfig { max_frame_size: 64, ..Default::default() });
        let command =
            Command::SendChatMessage { channel: "general".into(), text: "x".repeat(128) };
        assert!(matches!(transport.encode(&command), Err(TransportError::Encode(_))));
    }

    #[test]
    fn local_commands_have_no_frame() {
        let transport = Transport::new(TransportConfig::default());
        let command = Command::SetFocus { channel: "general".into() };
        assert!(transport.encode(&command).unwrap().is_none());
    }

    #[tokio::test]
    async fn idle_transport_yields_nothing() {
        let mut transport = Transport::new(TransportConfig::default());
        transport.send(&Command::RequestChannelDirectory);
        transport.disconnect();
        assert!(!transport.is_open());
        assert!(transport.next_event().await.is_none());
    }

    #[tokio::test]
    async fn invalid_endpoint_surfaces_as_error_event() {
        let mut transport = Transport::new(TransportConfig::default());
        transport.connect("not a url", "");

        let event = transport.next_event().await.unwrap();
        assert!(matches!(event, SessionEvent::Error { .. }));
        assert!(transport.next_event().await.is_none());
    }
}
