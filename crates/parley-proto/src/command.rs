//! Commands from the presentation layer.

use crate::{
    ChannelName, ClientMessage,
    payloads::client::{ChannelRef, ChatPost},
};

/// User intents accepted by the session engine.
///
/// Some commands become wire messages ([`Command::to_client_message`]);
/// the rest act on the connection or on local state only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a connection.
    Connect {
        /// WebSocket URL. Only plain `ws://` is supported; TLS is not built in.
        endpoint: String,
        /// Token presented once during the upgrade. Empty for none.
        auth_token: String,
    },

    /// Close the current connection.
    Disconnect,

    /// Ask the server for its channel directory.
    RequestChannelDirectory,

    /// Join a channel.
    JoinChannel {
        /// Channel to join.
        channel: ChannelName,
    },

    /// Leave a channel.
    LeaveChannel {
        /// Channel to leave.
        channel: ChannelName,
    },

    /// Post chat text. Empty text is never sent.
    SendChatMessage {
        /// Target channel.
        channel: ChannelName,
        /// Message text.
        text: String,
    },

    /// Move focus to a channel. Local only.
    SetFocus {
        /// Channel to focus.
        channel: ChannelName,
    },
}

impl Command {
    /// Wire message for commands the server must see.
    ///
    /// `None` for connection lifecycle, local focus, and empty chat text.
    pub fn to_client_message(&self) -> Option<ClientMessage> {
        match self {
            Command::RequestChannelDirectory => Some(ClientMessage::ChannelsList),
            Command::JoinChannel { channel } => {
                Some(ClientMessage::ChannelJoin(ChannelRef { channel: channel.clone() }))
            },
            Command::LeaveChannel { channel } => {
                Some(ClientMessage::ChannelLeave(ChannelRef { channel: channel.clone() }))
            },
            Command::SendChatMessage { channel, text } if !text.is_empty() => {
                Some(ClientMessage::ChannelChat(ChatPost {
                    channel: channel.clone(),
                    message: text.clone(),
                }))
            },
            Command::SendChatMessage { .. }
            | Command::Connect { .. }
            | Command::Disconnect
            | Command::SetFocus { .. } => None,
        }
    }
}
