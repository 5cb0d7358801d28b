use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::error::{LinkError, LinkResult};

/// LineTalk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Listener side
    #[serde(default)]
    pub server: ServerConfig,
    /// Connector side
    #[serde(default)]
    pub client: ClientConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Address the server binds and accepts its single connection on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Address the client connects to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_connect_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Give up connecting after this long; unset waits as long as the OS does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_connect_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    2222
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_port(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_connect_host(),
            port: default_port(),
            connect_timeout_ms: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` form accepted by `TcpListener::bind`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientConfig {
    /// `host:port` form accepted by `TcpStream::connect`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

impl LinkConfig {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> LinkResult<()> {
        if !LOG_LEVELS.contains(&self.global.log_level.as_str()) {
            return Err(LinkError::Config {
                message: format!("unknown log level '{}'", self.global.log_level),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(LinkError::Config {
                message: "server host must not be empty".to_string(),
            });
        }
        if self.client.host.trim().is_empty() {
            return Err(LinkError::Config {
                message: "client host must not be empty".to_string(),
            });
        }
        // The server may bind an ephemeral port; the client cannot dial one.
        if self.client.port == 0 {
            return Err(LinkError::Config {
                message: "client port must be non-zero".to_string(),
            });
        }
        if self.client.connect_timeout_ms == Some(0) {
            return Err(LinkError::Config {
                message: "connect_timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
