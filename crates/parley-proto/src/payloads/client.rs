//! Payloads sent by the client.

use serde::{Deserialize, Serialize};

use crate::ChannelName;

/// Names the channel a join or leave request targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    /// Target channel.
    pub channel: ChannelName,
}

/// Chat text posted to a channel.
///
/// The server fills in the sender from the connection's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPost {
    /// Target channel.
    pub channel: ChannelName,
    /// Message text.
    pub message: String,
}
