//! Payloads sent by the server.
//!
//! Field names follow the server's JSON. Slices the server never populated
//! arrive as `null` and are read as empty.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ChannelName, Username};

/// Connection acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConnected {
    /// Identity the server assigned to this connection.
    pub username: Username,
}

/// Directory of channels known to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsListing {
    /// Channel names, in no particular order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub channels: Vec<ChannelName>,
}

/// A user entering or leaving a channel.
///
/// Shared by `channel.joined`/`channel.left` (broadcast to members) and
/// `user.join`/`user.leave` (addressed to the user who moved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Channel the user moved in or out of.
    pub channel: ChannelName,
    /// User who moved.
    pub username: Username,
}

/// Full membership of a channel, sent after joining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel name.
    pub name: ChannelName,
    /// Recipient of the snapshot, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Username>,
    /// Users currently in the channel.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<Username>,
}

/// Chat message delivered to channel members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDelivery {
    /// Author of the message.
    pub sender: Username,
    /// Channel the message was posted to.
    pub channel: ChannelName,
    /// Message text.
    pub message: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
