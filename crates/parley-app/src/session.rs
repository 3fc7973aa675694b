//! Observable session state.
//!
//! A [`Session`] is an immutable snapshot of everything the presentation
//! layer can see about one connection: status, identity, the channel
//! directory, per-channel membership and history, joined channels, and
//! focus.
//!
//! Snapshots share structure. The channel map and joined set sit behind
//! `Arc`, and a transition copies only the path down to the channel it
//! touches; every other channel in the new snapshot is the very same
//! allocation as in the old one. Within a channel, history and membership
//! are persistent collections, so appending an event or adding a member
//! costs the same however long the channel has been alive. Holding an old
//! snapshot is always safe because nothing is mutated in place.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use imbl::{OrdSet, Vector};
use parley_proto::{ChannelName, Username};

/// One entry in a channel's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Chat message.
    Chat {
        /// Author.
        sender: Username,
        /// Message text.
        text: Arc<str>,
    },
    /// A user joined.
    Joined {
        /// User who joined.
        username: Username,
    },
    /// A user left.
    Left {
        /// User who left.
        username: Username,
    },
}

/// Per-channel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    name: ChannelName,
    members: OrdSet<Username>,
    events: Vector<ChannelEvent>,
    has_activity: bool,
}

impl Channel {
    /// Empty channel: no members, no history, no activity.
    pub fn new(name: ChannelName) -> Self {
        Self { name, members: OrdSet::new(), events: Vector::new(), has_activity: false }
    }

    /// Channel name. Never changes.
    pub fn name(&self) -> &ChannelName {
        &self.name
    }

    /// Users known to be present.
    ///
    /// Authoritative only after a membership snapshot for this channel.
    pub fn members(&self) -> &OrdSet<Username> {
        &self.members
    }

    /// History, oldest first.
    pub fn events(&self) -> &Vector<ChannelEvent> {
        &self.events
    }

    /// Something happened here while another channel was focused.
    pub fn has_activity(&self) -> bool {
        self.has_activity
    }

    pub(crate) fn add_member(&mut self, username: Username) {
        self.members.insert(username);
    }

    pub(crate) fn remove_member(&mut self, username: &Username) {
        self.members.remove(username);
    }

    pub(crate) fn replace_members(&mut self, members: impl IntoIterator<Item = Username>) {
        self.members = members.into_iter().collect();
    }

    pub(crate) fn append(&mut self, event: ChannelEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn set_activity(&mut self, has_activity: bool) {
        self.has_activity = has_activity;
    }
}

/// Snapshot of one connection's client-visible state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    connected: bool,
    identity: Option<Username>,
    channels: Arc<BTreeMap<ChannelName, Arc<Channel>>>,
    joined: Arc<BTreeSet<ChannelName>>,
    focused: Option<ChannelName>,
}

impl Session {
    /// Fresh session: disconnected, anonymous, no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a connection acknowledgement and the next close/error.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Identity assigned by the server. `None` before the first connect.
    pub fn identity(&self) -> Option<&Username> {
        self.identity.as_ref()
    }

    /// Every channel the server has disclosed, by name.
    pub fn channels(&self) -> &BTreeMap<ChannelName, Arc<Channel>> {
        &self.channels
    }

    /// Channel by name.
    pub fn channel(&self, name: &str) -> Option<&Arc<Channel>> {
        self.channels.get(name)
    }

    /// Channels the local user has joined.
    pub fn joined(&self) -> &BTreeSet<ChannelName> {
        &self.joined
    }

    /// True if the local user is in `name`.
    pub fn is_joined(&self, name: &str) -> bool {
        self.joined.contains(name)
    }

    /// Channel selected for composition. `None` if nothing is focused.
    pub fn focused(&self) -> Option<&ChannelName> {
        self.focused.as_ref()
    }

    /// State of the focused channel.
    pub fn focused_channel(&self) -> Option<&Arc<Channel>> {
        self.focused.as_ref().and_then(|name| self.channels.get(name))
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub(crate) fn set_identity(&mut self, identity: Username) {
        self.identity = Some(identity);
    }

    pub(crate) fn set_focus(&mut self, channel: Option<ChannelName>) {
        self.focused = channel;
    }

    pub(crate) fn ensure_channel(&mut self, name: &ChannelName) {
        if !self.channels.contains_key(name) {
            Arc::make_mut(&mut self.channels)
                .insert(name.clone(), Arc::new(Channel::new(name.clone())));
        }
    }

    /// Copy-on-write access to one channel.
    ///
    /// Clones the channel map and the channel itself only if they are
    /// shared with another snapshot.
    pub(crate) fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        if !self.channels.contains_key(name) {
            return None;
        }
        Arc::make_mut(&mut self.channels).get_mut(name).map(Arc::make_mut)
    }

    pub(crate) fn join(&mut self, name: &ChannelName) {
        if !self.joined.contains(name) {
            Arc::make_mut(&mut self.joined).insert(name.clone());
        }
    }

    pub(crate) fn leave(&mut self, name: &str) {
        if self.joined.contains(name) {
            Arc::make_mut(&mut self.joined).remove(name);
        }
    }
}
