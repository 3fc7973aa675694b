//! Transport errors.

use parley_proto::ProtocolError;
use thiserror::Error;
use tokio_tungstenite::tungstenite::{self, http::header::InvalidHeaderValue};

/// Failures raised before a frame or connection ever reaches the socket.
///
/// These never escape the adapter as `Err`; their text becomes the `detail`
/// of an `Error` event or a log line.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint could not be turned into an upgrade request.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// Endpoint as given by the caller.
        endpoint: String,
        /// Underlying parse failure.
        #[source]
        source: tungstenite::Error,
    },

    /// Auth token cannot be carried as a `Sec-WebSocket-Protocol` value.
    #[error("auth token is not a valid subprotocol header: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),

    /// Outbound command could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] ProtocolError),
}
