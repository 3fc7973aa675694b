//! Driver trait for abstracting the transport.
//!
//! The [`Driver`] trait decouples the dispatch [`crate::Runtime`] from a
//! concrete connection. The WebSocket transport implements it for
//! production; tests script it.

use std::future::Future;

use parley_proto::{Command, SessionEvent};

/// Connection-side I/O for the runtime.
///
/// None of these calls block the caller, and none of them fail: every
/// failure comes back later as an event from
/// [`poll_event`](Driver::poll_event).
pub trait Driver: Send {
    /// Start connecting to `endpoint`, presenting `auth_token` once.
    fn connect(&mut self, endpoint: &str, auth_token: &str);

    /// Send a command to the server.
    ///
    /// Dropped without notice if no connection is open.
    fn send(&mut self, command: &Command);

    /// Close the current connection, if any.
    fn disconnect(&mut self);

    /// Next event from the connection, in arrival order.
    ///
    /// Returns `None` once the driver can produce no further events.
    fn poll_event(&mut self) -> impl Future<Output = Option<SessionEvent>> + Send;
}
