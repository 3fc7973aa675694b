//! Terminal client for Parley
//!
//! A thin line-oriented shell over [`parley_app::Runtime`]. Reads commands
//! from standard input, prints session changes to standard output. All
//! session logic lives in `parley-app`; this crate only parses lines and
//! renders snapshots.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod driver;
mod error;
pub mod input;
pub mod render;

pub use driver::WsDriver;
pub use error::CliError;
pub use input::{Input, InputError, LineParser};
pub use render::Renderer;
