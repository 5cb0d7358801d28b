//! Newline framing shared by the console and the connection.
//!
//! A line is every byte up to `\n`. The terminator (and a `\r` before it) is
//! stripped on read and a single `\n` is appended on write. Embedded newlines
//! are not escaped.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Read one line together with the number of bytes it took off the stream,
/// terminator included. `Ok(None)` means the stream ended before any byte
/// arrived.
pub async fn read_line<R>(reader: &mut R) -> std::io::Result<Option<(String, usize)>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = String::new();
    let n = reader.read_line(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some((strip_terminator(buf), n)))
}

/// Write `line` followed by `\n` and flush so the peer sees it immediately.
/// Returns the number of bytes put on the wire.
pub async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(line.len() + 1)
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
