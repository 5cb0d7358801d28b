use crate::core::line;
use crate::domain::error::{LinkError, LinkResult};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, Stdin, Stdout};

/// Prompt printed before every command read
pub const PROMPT: &str = "Enter Send/Quit/Receive";

/// Operator console: line input plus line output
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<I, O> Console<I, O>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub async fn prompt(&mut self) -> LinkResult<()> {
        self.print_line(PROMPT).await
    }

    /// Next operator line. End of input is fatal for the session.
    pub async fn read_line(&mut self) -> LinkResult<String> {
        line::read_line(&mut self.input)
            .await?
            .map(|(text, _)| text)
            .ok_or(LinkError::ConsoleClosed)
    }

    pub async fn print_line(&mut self, text: &str) -> LinkResult<()> {
        line::write_line(&mut self.output, text).await?;
        Ok(())
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
