//! JSON payloads, one typed message enum per direction.
//!
//! A [`Frame`] carries the kind and raw JSON; these enums carry the parsed
//! payload. Each variant maps to exactly one [`MessageKind`]. Unknown JSON
//! fields are ignored so the server may add fields without breaking older
//! clients.

pub mod client;
pub mod server;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Frame, MessageKind, SessionEvent,
    errors::{ProtocolError, Result},
};

/// Messages a client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Ask for the channel directory.
    ChannelsList,
    /// Join a channel.
    ChannelJoin(client::ChannelRef),
    /// Leave a channel.
    ChannelLeave(client::ChannelRef),
    /// Post chat text to a channel.
    ChannelChat(client::ChatPost),
}

impl ClientMessage {
    /// Kind on the wire.
    pub fn kind(&self) -> MessageKind {
        match self {
            ClientMessage::ChannelsList => MessageKind::ChannelsList,
            ClientMessage::ChannelJoin(_) => MessageKind::ChannelJoin,
            ClientMessage::ChannelLeave(_) => MessageKind::ChannelLeave,
            ClientMessage::ChannelChat(_) => MessageKind::ChannelChat,
        }
    }

    /// Encode into a frame.
    pub fn to_frame(&self) -> Result<Frame> {
        let kind = self.kind();
        match self {
            ClientMessage::ChannelsList => Ok(Frame::new(kind, "{}")),
            ClientMessage::ChannelJoin(p) | ClientMessage::ChannelLeave(p) => encode(kind, p),
            ClientMessage::ChannelChat(p) => encode(kind, p),
        }
    }

    /// Decode a frame sent by a client.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        match frame.kind() {
            MessageKind::ChannelsList => Ok(ClientMessage::ChannelsList),
            MessageKind::ChannelJoin => decode(frame).map(ClientMessage::ChannelJoin),
            MessageKind::ChannelLeave => decode(frame).map(ClientMessage::ChannelLeave),
            MessageKind::ChannelChat => decode(frame).map(ClientMessage::ChannelChat),
            other => Err(ProtocolError::UnexpectedKind(other)),
        }
    }
}

/// Messages the server sends to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Connection acknowledged; carries the assigned identity.
    UserConnected(server::UserConnected),
    /// Channel directory.
    ChannelsList(server::ChannelsListing),
    /// A user joined a channel the client is in.
    ChannelJoined(server::Membership),
    /// A user left a channel the client is in.
    ChannelLeft(server::Membership),
    /// Full membership of a channel.
    ChannelInfo(server::ChannelInfo),
    /// Chat message in a channel.
    ChannelChat(server::ChatDelivery),
    /// The client joined a channel.
    UserJoin(server::Membership),
    /// The client left a channel.
    UserLeave(server::Membership),
}

impl ServerMessage {
    /// Kind on the wire.
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::UserConnected(_) => MessageKind::UserConnected,
            ServerMessage::ChannelsList(_) => MessageKind::ChannelsList,
            ServerMessage::ChannelJoined(_) => MessageKind::ChannelJoined,
            ServerMessage::ChannelLeft(_) => MessageKind::ChannelLeft,
            ServerMessage::ChannelInfo(_) => MessageKind::ChannelInfo,
            ServerMessage::ChannelChat(_) => MessageKind::ChannelChat,
            ServerMessage::UserJoin(_) => MessageKind::UserJoin,
            ServerMessage::UserLeave(_) => MessageKind::UserLeave,
        }
    }

    /// Encode into a frame.
    pub fn to_frame(&self) -> Result<Frame> {
        let kind = self.kind();
        match self {
            ServerMessage::UserConnected(p) => encode(kind, p),
            ServerMessage::ChannelsList(p) => encode(kind, p),
            ServerMessage::ChannelJoined(p)
            | ServerMessage::ChannelLeft(p)
            | ServerMessage::UserJoin(p)
            | ServerMessage::UserLeave(p) => encode(kind, p),
            ServerMessage::ChannelInfo(p) => encode(kind, p),
            ServerMessage::ChannelChat(p) => encode(kind, p),
        }
    }

    /// Decode a frame sent by the server.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        match frame.kind() {
            MessageKind::UserConnected => decode(frame).map(ServerMessage::UserConnected),
            MessageKind::ChannelsList => decode(frame).map(ServerMessage::ChannelsList),
            MessageKind::ChannelJoined => decode(frame).map(ServerMessage::ChannelJoined),
            MessageKind::ChannelLeft => decode(frame).map(ServerMessage::ChannelLeft),
            MessageKind::ChannelInfo => decode(frame).map(ServerMessage::ChannelInfo),
            MessageKind::ChannelChat => decode(frame).map(ServerMessage::ChannelChat),
            MessageKind::UserJoin => decode(frame).map(ServerMessage::UserJoin),
            MessageKind::UserLeave => decode(frame).map(ServerMessage::UserLeave),
            other @ (MessageKind::ChannelJoin | MessageKind::ChannelLeave) => {
                Err(ProtocolError::UnexpectedKind(other))
            },
        }
    }

    /// Parse the text of one WebSocket message straight into a message.
    pub fn decode(text: &str) -> Result<Self> {
        Self::from_frame(&Frame::parse(text)?)
    }

    /// Translate into the session event it announces.
    pub fn into_event(self) -> SessionEvent {
        match self {
            ServerMessage::UserConnected(p) => SessionEvent::Connected { identity: p.username },
            ServerMessage::ChannelsList(p) => SessionEvent::ChannelsListed {
                names: p.channels.into_iter().filter(|name| !name.is_empty()).collect(),
            },
            ServerMessage::ChannelJoined(p) => {
                SessionEvent::ChannelJoinedByUser { channel: p.channel, username: p.username }
            },
            ServerMessage::ChannelLeft(p) => {
                SessionEvent::ChannelLeftByUser { channel: p.channel, username: p.username }
            },
            ServerMessage::ChannelInfo(p) => {
                SessionEvent::ChannelMembersSnapshot { channel: p.name, members: p.users }
            },
            ServerMessage::ChannelChat(p) => SessionEvent::ChannelChat {
                channel: p.channel,
                sender: p.sender,
                text: p.message.into(),
            },
            ServerMessage::UserJoin(p) => SessionEvent::SelfJoinedChannel { channel: p.channel },
            ServerMessage::UserLeave(p) => SessionEvent::SelfLeftChannel { channel: p.channel },
        }
    }
}

fn encode<T: Serialize>(kind: MessageKind, payload: &T) -> Result<Frame> {
    serde_json::to_string(payload)
        .map(|body| Frame::new(kind, body))
        .map_err(|source| ProtocolError::Json { kind, source })
}

fn decode<T: DeserializeOwned>(frame: &Frame) -> Result<T> {
    serde_json::from_str(frame.body())
        .map_err(|source| ProtocolError::Json { kind: frame.kind(), source })
}
