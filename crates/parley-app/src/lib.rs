//! Session engine for Parley
//!
//! Pure session reducer plus the single-task runtime that feeds it,
//! enabling deterministic tests with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`Session`]: immutable, structurally shared snapshot of client state
//! - [`reduce`]: pure transition function from (snapshot, event) to snapshot
//! - [`Store`]: owns the current snapshot and publishes updates
//! - [`Driver`]: trait for the connection side (transport or simulation)
//! - [`Runtime`]: dispatch loop joining commands, driver events, and store

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
pub mod invariants;
mod reducer;
mod runtime;
mod session;
mod store;

pub use driver::Driver;
pub use parley_proto::{ChannelName, Command, SessionEvent, Username};
pub use reducer::{ReduceError, reduce};
pub use runtime::{Runtime, RuntimeHandle};
pub use session::{Channel, ChannelEvent, Session};
pub use store::Store;
