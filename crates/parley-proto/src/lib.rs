//! Protocol vocabulary for Parley
//!
//! Everything the session engine exchanges, on either side of the core:
//!
//! - [`Frame`]: the line-framed wire unit (`<kind>\n<json>`)
//! - [`ClientMessage`] / [`ServerMessage`]: typed payloads per direction
//! - [`SessionEvent`]: what the transport reports and the reducer consumes
//! - [`Command`]: what the presentation layer asks the engine to do
//!
//! Decoding never panics. Malformed input surfaces as [`ProtocolError`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
pub mod errors;
pub mod event;
pub mod frame;
pub mod kind;
pub mod names;
pub mod payloads;

pub use command::Command;
pub use errors::ProtocolError;
pub use event::SessionEvent;
pub use frame::{Frame, WIRE_VERSION};
pub use kind::MessageKind;
pub use names::{ChannelName, Username};
pub use payloads::{ClientMessage, ServerMessage};
