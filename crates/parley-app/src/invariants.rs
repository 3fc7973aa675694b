//! Session invariants.
//!
//! Properties every snapshot must satisfy, checked by the property tests
//! after each transition and by the [`crate::Store`] in debug builds.

use std::fmt;

use crate::Session;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Every joined channel exists in the channel map.
    JoinedInChannels,
    /// The focused channel, if any, exists in the channel map.
    FocusInChannels,
    /// Each channel is stored under its own name.
    ChannelKeyMatchesName,
    /// Channel histories only ever grow by appending.
    LogGrowth,
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// A property that must hold for every snapshot.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against one snapshot.
    fn check(&self, session: &Session) -> InvariantResult;
}

/// Joined channels must exist in the channel map.
pub struct JoinedInChannels;

impl Invariant for JoinedInChannels {
    fn kind(&self) -> InvariantKind {
        InvariantKind::JoinedInChannels
    }

    fn check(&self, session: &Session) -> InvariantResult {
        match session.joined().iter().find(|name| session.channel(name.as_str()).is_none()) {
            Some(name) => Err(Violation {
                invariant: self.kind(),
                message: format!("joined channel {name} not in channels"),
            }),
            None => Ok(()),
        }
    }
}

/// The focused channel must exist in the channel map.
///
/// Focus does not require membership; browsing before joining is allowed.
pub struct FocusInChannels;

impl Invariant for FocusInChannels {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FocusInChannels
    }

    fn check(&self, session: &Session) -> InvariantResult {
        match session.focused() {
            Some(name) if session.channel(name.as_str()).is_none() => Err(Violation {
                invariant: self.kind(),
                message: format!("focused channel {name} not in channels"),
            }),
            _ => Ok(()),
        }
    }
}

/// Map keys agree with channel names.
pub struct ChannelKeyMatchesName;

impl Invariant for ChannelKeyMatchesName {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ChannelKeyMatchesName
    }

    fn check(&self, session: &Session) -> InvariantResult {
        match session.channels().iter().find(|(key, channel)| *key != channel.name()) {
            Some((key, channel)) => Err(Violation {
                invariant: self.kind(),
                message: format!("channel {} stored under key {key}", channel.name()),
            }),
            None => Ok(()),
        }
    }
}

/// Check that every channel's history in `next` extends the one in `prev`.
///
/// Channels present in `prev` must still exist in `next`, and their
/// existing events must be unchanged and in the same order.
pub fn check_log_growth(prev: &Session, next: &Session) -> InvariantResult {
    for (name, before) in prev.channels() {
        let Some(after) = next.channel(name.as_str()) else {
            return Err(Violation {
                invariant: InvariantKind::LogGrowth,
                message: format!("channel {name} disappeared"),
            });
        };

        let old = before.events();
        let new = after.events();
        if new.len() < old.len() || new.iter().zip(old.iter()).any(|(a, b)| a != b) {
            return Err(Violation {
                invariant: InvariantKind::LogGrowth,
                message: format!(
                    "channel {name}: history rewritten ({} events before, {} after)",
                    old.len(),
                    new.len()
                ),
            });
        }
    }
    Ok(())
}

/// Registry of snapshot invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry with every standard session invariant.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(JoinedInChannels);
        registry.add(FocusInChannels);
        registry.add(ChannelKeyMatchesName);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants, collecting every violation.
    pub fn check_all(&self, session: &Session) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(session).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}
