//! Snapshot store with explicit subscription.
//!
//! The [`Store`] owns the current [`Session`] and publishes every new
//! snapshot on a `tokio::sync::watch` channel. Readers hold immutable
//! snapshots; a stale one is still a consistent one.

use parley_proto::SessionEvent;
use tokio::sync::watch;

use crate::{Session, reduce};

/// Owner of the current session snapshot.
#[derive(Debug)]
pub struct Store {
    session: Session,
    publisher: watch::Sender<Session>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store holding a fresh session.
    pub fn new() -> Self {
        let session = Session::new();
        let (publisher, _) = watch::channel(session.clone());
        Self { session, publisher }
    }

    /// Current snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Subscribe to snapshot updates.
    ///
    /// The receiver starts at the current snapshot and sees every later
    /// one (intermediate snapshots may be skipped by a slow reader).
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.publisher.subscribe()
    }

    /// Apply one event.
    ///
    /// Returns `true` if a new snapshot was published. Consistency faults
    /// are logged and the event is skipped.
    pub fn dispatch(&mut self, event: &SessionEvent) -> bool {
        let next = match reduce(&self.session, event) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(error = %e, "session desynchronized; event skipped");
                return false;
            },
        };

        if let SessionEvent::FrameRejected { detail } = event {
            tracing::debug!(%detail, "rejected frame reached the store");
        }

        if next == self.session {
            return false;
        }

        #[cfg(debug_assertions)]
        self.debug_check(&next);

        tracing::trace!(event = event.name(), "session updated");
        self.session = next;
        self.publisher.send_replace(self.session.clone());
        true
    }

    /// Consume the store, returning the final snapshot.
    pub fn into_session(self) -> Session {
        self.session
    }

    #[cfg(debug_assertions)]
    fn debug_check(&self, next: &Session) {
        use crate::invariants::{InvariantRegistry, check_log_growth};

        if let Err(violations) = InvariantRegistry::standard().check_all(next) {
            for violation in violations {
                tracing::error!(%violation, "session invariant violated");
            }
        }
        if let Err(violation) = check_log_growth(&self.session, next) {
            tracing::error!(%violation, "session invariant violated");
        }
    }
}
