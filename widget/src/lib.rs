//! Terminal front end for a remote todo list.
//!
//! Mounts a `TodoApp` from explicit configuration, renders it as text and
//! turns typed commands into sync operations. Requests go out through a
//! blocking ureq agent.

pub mod command;
pub mod render;
pub mod session;
pub mod transport;

pub use command::{Command, CommandError};
pub use session::Session;
pub use transport::UreqTransport;
