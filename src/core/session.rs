use crate::core::command::ConsoleCommand;
use crate::core::console::Console;
use crate::core::line;
use crate::domain::error::{LinkError, LinkResult};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info};

/// Traffic counters for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub lines_sent: u64,
    pub lines_received: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// Why a session stopped without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Operator typed the quit command
    Quit,
    /// Process received Ctrl-C while the loop was waiting
    Interrupted,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::Quit => write!(f, "quit"),
            EndReason::Interrupted => write!(f, "interrupted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub reason: EndReason,
    pub stats: SessionStats,
}

/// One interactive session over a single bidirectional line stream.
///
/// The session owns both halves of the connection; dropping it closes the
/// socket whichever way the loop ended.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    stats: SessionStats,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Prompt, read a command, dispatch; repeat until quit or a fatal error.
    pub async fn run<I, O>(&mut self, console: &mut Console<I, O>) -> LinkResult<SessionOutcome>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        loop {
            match self.step(console).await {
                Ok(true) => continue,
                Ok(false) => {
                    info!(
                        "Session ended by operator: {} lines sent, {} lines received",
                        self.stats.lines_sent, self.stats.lines_received
                    );
                    return Ok(SessionOutcome {
                        reason: EndReason::Quit,
                        stats: self.stats.clone(),
                    });
                }
                Err(e) => {
                    error!("Session failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    /// One prompt/command round trip. Returns `false` once the operator quits.
    pub async fn step<I, O>(&mut self, console: &mut Console<I, O>) -> LinkResult<bool>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        console.prompt().await?;
        let input = console.read_line().await?;
        let command = ConsoleCommand::parse(&input);
        debug!("Console command: {}", command);

        match command {
            ConsoleCommand::Send => {
                let text = console.read_line().await?;
                self.send_line(&text).await?;
            }
            ConsoleCommand::Receive => {
                let text = self.receive_line().await?;
                console.print_line(&text).await?;
            }
            ConsoleCommand::Quit => return Ok(false),
            ConsoleCommand::Ignored => {}
        }
        Ok(true)
    }

    pub async fn send_line(&mut self, text: &str) -> LinkResult<()> {
        let n = line::write_line(&mut self.writer, text).await?;
        self.stats.lines_sent += 1;
        self.stats.bytes_sent += n as u64;
        debug!("Sent {} bytes", n);
        Ok(())
    }

    /// Blocks until the peer sends a full line or closes the connection.
    pub async fn receive_line(&mut self) -> LinkResult<String> {
        let (text, n) = line::read_line(&mut self.reader)
            .await?
            .ok_or(LinkError::PeerClosed)?;
        self.stats.lines_received += 1;
        self.stats.bytes_received += n as u64;
        debug!("Received {} bytes", n);
        Ok(text)
    }
}
