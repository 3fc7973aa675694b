//! Message kinds.
//!
//! The first line of every frame names its kind. `channels.list` and
//! `channel.chat` travel in both directions with different payload shapes,
//! so a kind alone does not determine the payload; the direction does.

use std::{fmt, str::FromStr};

use crate::ProtocolError;

/// Every message kind the protocol knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Directory request (client) or directory listing (server).
    ChannelsList,
    /// Request to join a channel.
    ChannelJoin,
    /// Request to leave a channel.
    ChannelLeave,
    /// Chat message, posted (client) or delivered (server).
    ChannelChat,
    /// Connection acknowledgement carrying the assigned identity.
    UserConnected,
    /// Some user joined a channel.
    ChannelJoined,
    /// Some user left a channel.
    ChannelLeft,
    /// Full membership of a channel.
    ChannelInfo,
    /// The local user is now in a channel.
    UserJoin,
    /// The local user is no longer in a channel.
    UserLeave,
}

impl MessageKind {
    /// All kinds, in declaration order.
    pub const ALL: [MessageKind; 10] = [
        MessageKind::ChannelsList,
        MessageKind::ChannelJoin,
        MessageKind::ChannelLeave,
        MessageKind::ChannelChat,
        MessageKind::UserConnected,
        MessageKind::ChannelJoined,
        MessageKind::ChannelLeft,
        MessageKind::ChannelInfo,
        MessageKind::UserJoin,
        MessageKind::UserLeave,
    ];

    /// Wire spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::ChannelsList => "channels.list",
            MessageKind::ChannelJoin => "channel.join",
            MessageKind::ChannelLeave => "channel.leave",
            MessageKind::ChannelChat => "channel.chat",
            MessageKind::UserConnected => "user.connected",
            MessageKind::ChannelJoined => "channel.joined",
            MessageKind::ChannelLeft => "channel.left",
            MessageKind::ChannelInfo => "channel.info",
            MessageKind::UserJoin => "user.join",
            MessageKind::UserLeave => "user.leave",
        }
    }

    /// True if a client may send this kind.
    pub fn is_client_kind(self) -> bool {
        matches!(
            self,
            MessageKind::ChannelsList
                | MessageKind::ChannelJoin
                | MessageKind::ChannelLeave
                | MessageKind::ChannelChat
        )
    }

    /// True if a server may send this kind.
    pub fn is_server_kind(self) -> bool {
        !matches!(self, MessageKind::ChannelJoin | MessageKind::ChannelLeave)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownKind(s.to_owned()))
    }
}
