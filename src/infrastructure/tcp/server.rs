use crate::domain::config::ServerConfig;
use crate::domain::error::{LinkError, LinkResult};
use crate::infrastructure::tcp::Connection;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Listener that hands out exactly one connection
pub struct LineServer {
    listener: TcpListener,
    bind_addr: SocketAddr,
}

impl LineServer {
    pub async fn bind(config: &ServerConfig) -> LinkResult<Self> {
        let addr = config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| LinkError::Bind {
                addr: addr.clone(),
                source,
            })?;

        let bind_addr = listener.local_addr()?;
        info!("Listening on {}", bind_addr);

        Ok(Self {
            listener,
            bind_addr,
        })
    }

    /// Actual bound address, useful when the configured port is 0
    pub fn local_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Wait for the single client. The listener is closed afterwards, so any
    /// later connection attempt is refused.
    pub async fn accept(self) -> LinkResult<Connection> {
        let (stream, peer_addr) = self.listener.accept().await?;
        info!("Client connected from {}", peer_addr);
        Ok(Connection::new(stream, peer_addr))
    }
}
