//! Session reducer.
//!
//! [`reduce`] is the only way a [`Session`] changes: given the current
//! snapshot and one event it returns the next snapshot. It performs no I/O
//! and never mutates its input.
//!
//! # Activity rule
//!
//! A channel is flagged when a membership or chat event lands on it while it
//! is not focused. The flag sticks until the channel gains focus or the
//! local user leaves it. A departure of the local user never flags.
//!
//! # Consistency faults
//!
//! Channels are created lazily by directory listings, joins, and self-joins.
//! Any other event naming an unknown channel means client and server have
//! drifted apart; the reducer returns [`ReduceError::UnknownChannel`] and
//! the caller keeps the previous snapshot.

use parley_proto::{ChannelName, SessionEvent, Username};
use thiserror::Error;

use crate::{Channel, ChannelEvent, Session};

/// Reducer faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// Event names a channel the session has never seen.
    #[error("{event} references unknown channel {channel:?}")]
    UnknownChannel {
        /// Name of the offending event.
        event: &'static str,
        /// Channel that does not exist.
        channel: ChannelName,
    },
}

/// Produce the snapshot that follows `session` after `event`.
///
/// While disconnected, server messages are stale and leave the snapshot
/// unchanged; lifecycle events and local focus still apply.
///
/// `FocusChanged` is exempt from the guard because focus is local-only and
/// never originates from the server.
pub fn reduce(session: &Session, event: &SessionEvent) -> Result<Session, ReduceError> {
    if !session.is_connected() && event.is_server_message() {
        return Ok(session.clone());
    }

    let mut next = session.clone();

    match event {
        SessionEvent::Closed | SessionEvent::Error { .. } => {
            next.set_connected(false);
        },
        SessionEvent::Connected { identity } => {
            next.set_connected(true);
            next.set_identity(identity.clone());
        },
        SessionEvent::ChannelsListed { names } => {
            for name in names {
                next.ensure_channel(name);
            }
        },
        SessionEvent::ChannelJoinedByUser { channel, username } => {
            next.ensure_channel(channel);
            let flag = is_unfocused(session, channel);
            update_channel(&mut next, event, channel, |ch| {
                ch.add_member(username.clone());
                ch.append(ChannelEvent::Joined { username: username.clone() });
                ch.set_activity(ch.has_activity() || flag);
            })?;
        },
        SessionEvent::ChannelLeftByUser { channel, username } => {
            let flag = is_unfocused(session, channel) && !is_self(session, username);
            update_channel(&mut next, event, channel, |ch| {
                ch.remove_member(username);
                ch.append(ChannelEvent::Left { username: username.clone() });
                ch.set_activity(ch.has_activity() || flag);
            })?;
        },
        SessionEvent::ChannelMembersSnapshot { channel, members } => {
            update_channel(&mut next, event, channel, |ch| {
                ch.replace_members(members.iter().cloned());
            })?;
        },
        SessionEvent::ChannelChat { channel, sender, text } => {
            let flag = is_unfocused(session, channel);
            update_channel(&mut next, event, channel, |ch| {
                ch.append(ChannelEvent::Chat { sender: sender.clone(), text: text.clone() });
                ch.set_activity(ch.has_activity() || flag);
            })?;
        },
        SessionEvent::SelfJoinedChannel { channel } => {
            next.ensure_channel(channel);
            next.join(channel);
        },
        SessionEvent::SelfLeftChannel { channel } => {
            update_channel(&mut next, event, channel, |ch| ch.set_activity(false))?;
            next.leave(channel.as_str());
            if session.focused() == Some(channel) {
                next.set_focus(None);
            }
        },
        SessionEvent::FocusChanged { channel } => {
            update_channel(&mut next, event, channel, |ch| ch.set_activity(false))?;
            next.set_focus(Some(channel.clone()));
        },
        SessionEvent::FrameRejected { .. } => {},
        _ => {},
    }

    Ok(next)
}

fn is_unfocused(session: &Session, channel: &ChannelName) -> bool {
    session.focused() != Some(channel)
}

fn is_self(session: &Session, username: &Username) -> bool {
    session.identity() == Some(username)
}

fn update_channel(
    session: &mut Session,
    event: &SessionEvent,
    channel: &ChannelName,
    update: impl FnOnce(&mut Channel),
) -> Result<(), ReduceError> {
    let ch = session
        .channel_mut(channel.as_str())
        .ok_or_else(|| ReduceError::UnknownChannel { event: event.name(), channel: channel.clone() })?;
    update(ch);
    Ok(())
}
