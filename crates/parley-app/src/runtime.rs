//! Single-task dispatch loop.
//!
//! The Runtime drives the session, coordinating between:
//! - Commands from the presentation layer (through [`RuntimeHandle`])
//! - Events from the [`Driver`]
//! - The [`Store`] that reduces events into snapshots
//!
//! Everything runs on one task, so transitions never overlap and events are
//! reduced in exactly the order they arrive.

use parley_proto::{Command, SessionEvent};
use tokio::sync::{mpsc, watch};

use crate::{Driver, Session, Store};

/// Depth of the command queue between presentation and runtime.
const COMMAND_QUEUE_DEPTH: usize = 64;

/// Presentation-side handle to a running [`Runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Session>,
}

impl RuntimeHandle {
    /// Sender for commands. The runtime stops once every sender is dropped.
    pub fn commands(&self) -> mpsc::Sender<Command> {
        self.commands.clone()
    }

    /// Queue a command.
    ///
    /// Returns `false` if the runtime has stopped.
    pub async fn submit(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Subscribe to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.snapshots.clone()
    }
}

/// Dispatch loop owning the driver and the session store.
pub struct Runtime<D: Driver> {
    driver: D,
    store: Store,
    commands: mpsc::Receiver<Command>,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime and the handle used to drive it.
    pub fn new(driver: D) -> (Self, RuntimeHandle) {
        let store = Store::new();
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let handle = RuntimeHandle { commands: tx, snapshots: store.subscribe() };
        (Self { driver, store, commands: rx }, handle)
    }

    /// Run until every command sender is dropped.
    ///
    /// On exit the driver is disconnected and its remaining events are
    /// applied up to the terminal one, so the connection closes cleanly
    /// before the final snapshot is returned.
    pub async fn run(mut self) -> Session {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.execute(command),
                    None => break,
                },
                Some(event) = self.driver.poll_event() => {
                    self.apply(&event);
                },
            }
        }

        tracing::debug!("command stream closed; stopping runtime");
        self.driver.disconnect();
        while let Some(event) = self.driver.poll_event().await {
            self.apply(&event);
            if event.is_terminal() {
                break;
            }
        }
        self.store.into_session()
    }

    /// Execute one command.
    ///
    /// Focus changes never leave the process; everything else goes through
    /// the driver.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Connect { endpoint, auth_token } => {
                tracing::info!(%endpoint, "connecting");
                self.driver.connect(&endpoint, &auth_token);
            },
            Command::Disconnect => self.driver.disconnect(),
            Command::SetFocus { channel } => {
                self.apply(&SessionEvent::FocusChanged { channel });
            },
            Command::SendChatMessage { ref text, .. } if text.is_empty() => {
                tracing::debug!("empty chat message dropped");
            },
            Command::RequestChannelDirectory
            | Command::JoinChannel { .. }
            | Command::LeaveChannel { .. }
            | Command::SendChatMessage { .. } => self.driver.send(&command),
        }
    }

    /// Reduce one event into the store.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Error { detail } => tracing::warn!(%detail, "connection error"),
            SessionEvent::Closed => tracing::info!("connection closed"),
            SessionEvent::Connected { identity } => tracing::info!(%identity, "connected"),
            _ => {},
        }
        self.store.dispatch(event);
    }

    /// Current snapshot.
    pub fn session(&self) -> &Session {
        self.store.session()
    }
}
