//! Transport
//!
//! WebSocket adapter between the Parley chat server and the session engine.
//! It turns [`Command`](parley_proto::Command)s into wire frames and every
//! inbound frame or connection state change into exactly one
//! [`SessionEvent`](parley_proto::SessionEvent).
//!
//! # Components
//!
//! - [`Transport`]: connection owner with a non-blocking `connect`
//! - [`TransportConfig`]: queue depth and frame size limit
//! - [`TransportError`]: request construction failures
//!
//! The adapter holds no session state. It does not retry, reconnect, or time
//! out; all of that is left to whoever issues commands.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
pub mod transport;

pub use config::TransportConfig;
pub use error::TransportError;
pub use transport::Transport;
