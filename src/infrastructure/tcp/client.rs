use crate::domain::config::ClientConfig;
use crate::domain::error::{LinkError, LinkResult};
use crate::infrastructure::tcp::Connection;
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Open the client's connection, honouring the optional connect timeout.
pub async fn connect(config: &ClientConfig) -> LinkResult<Connection> {
    let addr = config.addr();
    debug!("Connecting to {}", addr);

    let attempt = TcpStream::connect(addr.as_str());
    let result = match config.connect_timeout() {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .map_err(|_| LinkError::ConnectTimeout { addr: addr.clone() })?,
        None => attempt.await,
    };

    let stream = result.map_err(|source| LinkError::Connect {
        addr: addr.clone(),
        source,
    })?;
    let peer_addr = stream.peer_addr()?;

    info!("TCP connection established to {}", peer_addr);
    Ok(Connection::new(stream, peer_addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn client_config(port: u16, connect_timeout_ms: Option<u64>) -> ClientConfig {
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port,
            connect_timeout_ms,
        }
    }

    #[tokio::test]
    async fn test_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = client_config(addr.port(), Some(1000));
        let (conn, accepted) = tokio::join!(
            connect(&config),
            listener.accept()
        );
        let conn = conn.unwrap();
        let (_, client_addr) = accepted.unwrap();

        assert_eq!(conn.peer_addr(), addr);
        assert_eq!(conn.local_addr(), Some(client_addr));
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Grab a free port, then release it so nothing is listening there
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = connect(&client_config(port, None)).await.err().unwrap();
        assert!(matches!(err, LinkError::Connect { .. }));
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        // A listener that never accepts: once its backlog is full the kernel
        // drops further SYNs and the handshake never completes.
        let socket = tokio::net::TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(1).unwrap();
        let port = listener.local_addr().unwrap().port();

        let mut held = Vec::new();
        for _ in 0..32 {
            match connect(&client_config(port, Some(200))).await {
                Ok(conn) => held.push(conn),
                Err(LinkError::ConnectTimeout { addr }) => {
                    assert_eq!(addr, format!("127.0.0.1:{}", port));
                    return;
                }
                Err(other) => panic!("expected a connect timeout, got {:?}", other),
            }
        }
        panic!("backlog never filled after {} connections", held.len());
    }
}
