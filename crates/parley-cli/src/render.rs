//! Snapshot rendering.
//!
//! [`Renderer`] remembers the last snapshot it printed and turns the
//! difference to the next one into text lines. Chat in the focused channel
//! is printed bare; everything else is prefixed with its channel.

use std::sync::Arc;

use parley_app::{Channel, ChannelEvent, ChannelName, Session};

/// Turns successive snapshots into output lines.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    previous: Session,
}

impl Renderer {
    /// Create a renderer that treats `session` as already shown.
    pub fn new(session: Session) -> Self {
        Self { previous: session }
    }

    /// Lines describing what changed since the last call.
    pub fn render(&mut self, next: &Session) -> Vec<String> {
        let prev = &self.previous;
        let mut lines = Vec::new();

        match (prev.is_connected(), next.is_connected()) {
            (false, true) => lines.push(format!(
                "* connected as {}",
                next.identity().map_or("(unknown)", |u| u.as_str())
            )),
            (true, false) => lines.push("* disconnected".to_owned()),
            _ => {},
        }

        let discovered: Vec<&str> = next
            .channels()
            .keys()
            .filter(|name| !prev.channels().contains_key(*name))
            .map(ChannelName::as_str)
            .collect();
        if !discovered.is_empty() {
            lines.push(format!("* channels: {}", discovered.join(", ")));
        }

        for name in next.joined().difference(prev.joined()) {
            lines.push(format!("* joined #{name}"));
        }
        for name in prev.joined().difference(next.joined()) {
            lines.push(format!("* left #{name}"));
        }

        if next.focused() != prev.focused() {
            lines.push(match next.focused() {
                Some(name) => format!("* talking in #{name}"),
                None => "* no focused channel".to_owned(),
            });
        }

        for (name, channel) in next.channels() {
            let before = prev.channel(name.as_str());
            if before.is_some_and(|b| Arc::ptr_eq(b, channel)) {
                continue;
            }

            let focused = next.focused() == Some(name);
            let seen = before.map_or(0, |b| b.events().len());
            for event in channel.events().iter().skip(seen) {
                lines.push(event_line(name, event, focused));
            }

            if channel.has_activity() && !before.is_some_and(|b| b.has_activity()) {
                lines.push(activity_line(channel));
            }
        }

        self.previous = next.clone();
        lines
    }
}

fn event_line(channel: &ChannelName, event: &ChannelEvent, focused: bool) -> String {
    let body = match event {
        ChannelEvent::Chat { sender, text } => format!("<{sender}> {text}"),
        ChannelEvent::Joined { username } => format!("* {username} joined"),
        ChannelEvent::Left { username } => format!("* {username} left"),
    };
    if focused { body } else { format!("[#{channel}] {body}") }
}

fn activity_line(channel: &Channel) -> String {
    format!("* new activity in #{}", channel.name())
}
