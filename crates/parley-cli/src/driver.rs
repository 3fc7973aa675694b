//! WebSocket driver for the shell.
//!
//! Implements the [`Driver`] trait on top of [`Transport`].

use parley_app::{Command, Driver, SessionEvent};
use parley_client::{Transport, TransportConfig};

/// [`Driver`] backed by the WebSocket transport.
pub struct WsDriver(Transport);

impl WsDriver {
    /// Create a driver with no connection.
    pub fn new(config: TransportConfig) -> Self {
        Self(Transport::new(config))
    }
}

impl Driver for WsDriver {
    fn connect(&mut self, endpoint: &str, auth_token: &str) {
        self.0.connect(endpoint, auth_token);
    }

    fn send(&mut self, command: &Command) {
        self.0.send(command);
    }

    fn disconnect(&mut self) {
        self.0.disconnect();
    }

    fn poll_event(&mut self) -> impl Future<Output = Option<SessionEvent>> + Send {
        self.0.next_event()
    }
}
