//! Terminal front-end for the todo service.
//!
//! The controller in `todo_core` never performs I/O; this crate supplies the
//! transport, a blocking `Session` driver and text rendering.

pub mod command;
pub mod render;
pub mod session;
pub mod transport;

#[cfg(test)]
mod scripted;

pub use command::Command;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
