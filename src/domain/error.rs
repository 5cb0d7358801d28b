use thiserror::Error;

/// LineTalk unified error type
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection timeout to {addr}")]
    ConnectTimeout { addr: String },

    #[error("Console input closed")]
    ConsoleClosed,

    #[error("Connection closed by peer")]
    PeerClosed,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {0}")]
    Output(String),
}

pub type LinkResult<T> = Result<T, LinkError>;
