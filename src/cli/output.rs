use crate::cli::args::OutputFormat;
use crate::domain::config::LinkConfig;
use std::io::{self, Write};
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_config(&self, config: &LinkConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::LinkError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render into a string; `write_*` print the same text to stdout
    pub fn render_config(&self, config: &LinkConfig) -> Result<String, OutputError> {
        let rendered = match self.format {
            OutputFormat::Text => {
                let mut out = String::from("LineTalk Configuration:\n");
                out.push_str(&format!("  Log level: {}\n", config.global.log_level));
                out.push_str(&format!("  Server: {}\n", config.server.addr()));
                out.push_str(&format!("  Client: {}\n", config.client.addr()));
                match config.client.connect_timeout_ms {
                    Some(ms) => out.push_str(&format!("  Connect timeout: {}ms", ms)),
                    None => out.push_str("  Connect timeout: none"),
                }
                out
            }
            OutputFormat::Json => serde_json::to_string_pretty(config)?,
            OutputFormat::Table => Table::new(ConfigTableRow::rows(config)).to_string(),
        };
        Ok(rendered)
    }

    pub fn render_message(&self, message: &str) -> Result<String, OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            _ => Ok(message.to_string()),
        }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_config(&self, config: &LinkConfig) -> Result<(), OutputError> {
        let rendered = self.render_config(config)?;
        writeln!(io::stdout(), "{}", rendered)?;
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        writeln!(io::stdout(), "{}", self.render_message(message)?)?;
        Ok(())
    }
}

/// Table row for configuration display
#[derive(Tabled)]
struct ConfigTableRow {
    #[tabled(rename = "Section")]
    section: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl ConfigTableRow {
    fn rows(config: &LinkConfig) -> Vec<Self> {
        let row = |section, key, value: String| Self { section, key, value };
        vec![
            row("global", "log_level", config.global.log_level.clone()),
            row("server", "host", config.server.host.clone()),
            row("server", "port", config.server.port.to_string()),
            row("client", "host", config.client.host.clone()),
            row("client", "port", config.client.port.to_string()),
            row(
                "client",
                "connect_timeout_ms",
                config
                    .client
                    .connect_timeout_ms
                    .map(|ms| ms.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}
