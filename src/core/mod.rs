// Core module - Interactive line relay
pub mod command;
pub mod console;
pub mod line;
pub mod session;

pub use command::ConsoleCommand;
pub use console::{Console, PROMPT};
pub use session::{EndReason, Session, SessionOutcome, SessionStats};
