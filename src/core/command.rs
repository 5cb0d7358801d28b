/// Operator command typed at the console prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Read another console line and write it to the peer
    Send,
    /// Read one line from the peer and print it
    Receive,
    /// End the session
    Quit,
    /// Anything else, including an empty line
    Ignored,
}

impl ConsoleCommand {
    /// Dispatch on the first character of an input line, case-insensitively.
    pub fn parse(input: &str) -> Self {
        match input.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('s') => Self::Send,
            Some('r') => Self::Receive,
            Some('q') => Self::Quit,
            _ => Self::Ignored,
        }
    }
}

impl std::fmt::Display for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleCommand::Send => write!(f, "send"),
            ConsoleCommand::Receive => write!(f, "receive"),
            ConsoleCommand::Quit => write!(f, "quit"),
            ConsoleCommand::Ignored => write!(f, "ignored"),
        }
    }
}
