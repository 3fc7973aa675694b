//! Protocol errors.

use thiserror::Error;

use crate::MessageKind;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Decode and encode faults.
///
/// None of these are fatal to a connection: the offending frame is dropped
/// and the session state is left untouched.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame has no `\n` between kind and payload.
    #[error("frame has no kind/payload separator")]
    MissingSeparator,

    /// Kind line is empty.
    #[error("frame kind is empty")]
    EmptyKind,

    /// Kind is not part of the protocol.
    #[error("unknown message kind {0:?}")]
    UnknownKind(String),

    /// Kind exists, but never travels in this direction.
    #[error("message kind {0} is not valid in this direction")]
    UnexpectedKind(MessageKind),

    /// Payload does not match the schema for its kind.
    #[error("invalid {kind} payload: {source}")]
    Json {
        /// Kind whose payload failed to parse.
        kind: MessageKind,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Encoded frame exceeds the size the server accepts.
    #[error("frame of {size} bytes exceeds limit of {limit}")]
    FrameTooLarge {
        /// Encoded size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}
