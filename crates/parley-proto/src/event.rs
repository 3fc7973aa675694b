//! Session events.
//!
//! [`SessionEvent`] is the single stream that drives the session reducer.
//! Events come from three places:
//! - Transport lifecycle (`Connected`, `Closed`, `Error`)
//! - Decoded server messages (membership, chat, directory)
//! - Local intents that never touch the wire (`FocusChanged`)

use std::sync::Arc;

use crate::{ChannelName, Username};

/// One logical occurrence observed by the client, in arrival order.
///
/// New variants may be added; consumers ignore the ones they do not know.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionEvent {
    /// Server acknowledged the connection.
    Connected {
        /// Identity assigned by the server.
        identity: Username,
    },

    /// Connection closed by the server, the network, or a local disconnect.
    Closed,

    /// Connection failed or broke.
    Error {
        /// Human-readable description.
        detail: String,
    },

    /// Channel directory received.
    ChannelsListed {
        /// Channels the server disclosed.
        names: Vec<ChannelName>,
    },

    /// A user joined a channel.
    ChannelJoinedByUser {
        /// Channel joined.
        channel: ChannelName,
        /// User who joined.
        username: Username,
    },

    /// A user left a channel.
    ChannelLeftByUser {
        /// Channel left.
        channel: ChannelName,
        /// User who left.
        username: Username,
    },

    /// Authoritative membership of a channel.
    ChannelMembersSnapshot {
        /// Channel described.
        channel: ChannelName,
        /// Everyone currently in it.
        members: Vec<Username>,
    },

    /// Chat message in a channel.
    ChannelChat {
        /// Channel posted to.
        channel: ChannelName,
        /// Author.
        sender: Username,
        /// Message text.
        text: Arc<str>,
    },

    /// The local user joined a channel.
    SelfJoinedChannel {
        /// Channel joined.
        channel: ChannelName,
    },

    /// The local user left a channel.
    SelfLeftChannel {
        /// Channel left.
        channel: ChannelName,
    },

    /// Focus moved to a channel. Local only.
    FocusChanged {
        /// Newly focused channel.
        channel: ChannelName,
    },

    /// An inbound frame was dropped as undecodable.
    FrameRejected {
        /// Why decoding failed.
        detail: String,
    },
}

impl SessionEvent {
    /// Short, stable name for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Connected { .. } => "Connected",
            SessionEvent::Closed => "Closed",
            SessionEvent::Error { .. } => "Error",
            SessionEvent::ChannelsListed { .. } => "ChannelsListed",
            SessionEvent::ChannelJoinedByUser { .. } => "ChannelJoinedByUser",
            SessionEvent::ChannelLeftByUser { .. } => "ChannelLeftByUser",
            SessionEvent::ChannelMembersSnapshot { .. } => "ChannelMembersSnapshot",
            SessionEvent::ChannelChat { .. } => "ChannelChat",
            SessionEvent::SelfJoinedChannel { .. } => "SelfJoinedChannel",
            SessionEvent::SelfLeftChannel { .. } => "SelfLeftChannel",
            SessionEvent::FocusChanged { .. } => "FocusChanged",
            SessionEvent::FrameRejected { .. } => "FrameRejected",
        }
    }

    /// Channel this event is about, if it names exactly one.
    pub fn channel(&self) -> Option<&ChannelName> {
        match self {
            SessionEvent::ChannelJoinedByUser { channel, .. }
            | SessionEvent::ChannelLeftByUser { channel, .. }
            | SessionEvent::ChannelMembersSnapshot { channel, .. }
            | SessionEvent::ChannelChat { channel, .. }
            | SessionEvent::SelfJoinedChannel { channel }
            | SessionEvent::SelfLeftChannel { channel }
            | SessionEvent::FocusChanged { channel } => Some(channel),
            SessionEvent::Connected { .. }
            | SessionEvent::Closed
            | SessionEvent::Error { .. }
            | SessionEvent::ChannelsListed { .. }
            | SessionEvent::FrameRejected { .. } => None,
        }
    }

    /// True for events decoded from server messages (as opposed to
    /// transport lifecycle, local intents, and diagnostics).
    pub fn is_server_message(&self) -> bool {
        matches!(
            self,
            SessionEvent::ChannelsListed { .. }
                | SessionEvent::ChannelJoinedByUser { .. }
                | SessionEvent::ChannelLeftByUser { .. }
                | SessionEvent::ChannelMembersSnapshot { .. }
                | SessionEvent::ChannelChat { .. }
                | SessionEvent::SelfJoinedChannel { .. }
                | SessionEvent::SelfLeftChannel { .. }
        )
    }

    /// True for the events that end a connection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::Closed | SessionEvent::Error { .. })
    }
}
