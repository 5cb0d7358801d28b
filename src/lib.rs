//! LineTalk Library
//!
//! Two-role line relay: a server that accepts exactly one TCP connection and
//! a client that dials it, both driven by an interactive send/receive/quit
//! console.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use self::core::{Console, ConsoleCommand, EndReason, Session, SessionOutcome, SessionStats};
pub use domain::config::{ClientConfig, LinkConfig, ServerConfig};
pub use domain::error::{LinkError, LinkResult};
pub use infrastructure::tcp::{connect, Connection, LineServer};
