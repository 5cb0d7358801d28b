use linetalk::{
    connect, ClientConfig, Connection, Console, EndReason, LineServer, LinkError, LinkResult,
    ServerConfig,
};

/// Integration tests for the two roles talking over loopback
#[cfg(test)]
mod integration_tests {
    use super::*;

    async fn listen() -> (LineServer, ClientConfig) {
        let server = LineServer::bind(&ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        })
        .await
        .expect("Failed to bind loopback server");

        let client = ClientConfig {
            host: "127.0.0.1".to_string(),
            port: server.local_addr().port(),
            connect_timeout_ms: Some(2000),
        };
        (server, client)
    }

    async fn pair() -> (Connection, Connection) {
        let (server, client_config) = listen().await;
        let (accepted, connected) = tokio::join!(server.accept(), connect(&client_config));
        (accepted.expect("accept failed"), connected.expect("connect failed"))
    }

    /// Run one side's console script to completion and return what it printed
    async fn run_script(connection: Connection, script: &str) -> (LinkResult<EndReason>, String) {
        let mut console = Console::new(script.as_bytes(), Vec::new());
        let mut session = connection.into_session();
        let result = session.run(&mut console).await.map(|outcome| outcome.reason);
        drop(session);
        let printed = String::from_utf8(console.into_output()).expect("console output is UTF-8");
        (result, printed)
    }

    #[tokio::test]
    async fn test_send_then_receive_hello() {
        let (server_side, client_side) = pair().await;

        let (client, server) = tokio::join!(
            run_script(client_side, "S\nhello\nq\n"),
            run_script(server_side, "R\nq\n"),
        );

        assert_eq!(client.0.unwrap(), EndReason::Quit);
        assert_eq!(server.0.unwrap(), EndReason::Quit);

        let lines: Vec<&str> = server.1.lines().collect();
        assert_eq!(
            lines,
            vec!["Enter Send/Quit/Receive", "hello", "Enter Send/Quit/Receive"]
        );
    }

    #[tokio::test]
    async fn test_server_can_send_to_client() {
        let (server_side, client_side) = pair().await;

        let (server, client) = tokio::join!(
            run_script(server_side, "s\nfrom the listener\nq\n"),
            run_script(client_side, "r\nq\n"),
        );

        assert!(server.0.is_ok());
        assert!(client.0.is_ok());
        assert!(client.1.lines().any(|l| l == "from the listener"));
    }

    #[tokio::test]
    async fn test_lines_are_delivered_in_order() {
        let (server_side, client_side) = pair().await;
        let messages: Vec<String> = (1..=5).map(|i| format!("line {}", i)).collect();

        let mut send_script = String::new();
        for message in &messages {
            send_script.push_str(&format!("s\n{}\n", message));
        }
        send_script.push_str("q\n");
        let receive_script = format!("{}q\n", "r\n".repeat(messages.len()));

        let (sender, receiver) = tokio::join!(
            run_script(client_side, &send_script),
            run_script(server_side, &receive_script),
        );
        assert!(sender.0.is_ok());
        assert!(receiver.0.is_ok());

        let received: Vec<&str> = receiver
            .1
            .lines()
            .filter(|l| *l != linetalk::core::PROMPT)
            .collect();
        assert_eq!(received, messages);
    }

    #[tokio::test]
    async fn test_unknown_command_only_reprompts() {
        let (server_side, _client_side) = pair().await;

        let (result, printed) = run_script(server_side, "X\nhello?\nq\n").await;

        assert_eq!(result.unwrap(), EndReason::Quit);
        assert_eq!(printed, "Enter Send/Quit/Receive\n".repeat(3));
    }

    #[tokio::test]
    async fn test_peer_receive_fails_after_quit() {
        let (server_side, client_side) = pair().await;

        let (client, _) = run_script(client_side, "q\n").await;
        assert_eq!(client.unwrap(), EndReason::Quit);

        let (server, _) = run_script(server_side, "r\n").await;
        assert!(matches!(server, Err(LinkError::PeerClosed)));
    }

    #[tokio::test]
    async fn test_second_connection_is_refused() {
        let (server, client_config) = listen().await;

        let (accepted, first) = tokio::join!(server.accept(), connect(&client_config));
        let _accepted = accepted.unwrap();
        let _first = first.unwrap();

        let second = connect(&client_config).await;
        assert!(matches!(second, Err(LinkError::Connect { .. })));
    }

    #[tokio::test]
    async fn test_console_end_of_input_is_reported() {
        let (server_side, _client_side) = pair().await;

        let (result, printed) = run_script(server_side, "").await;

        assert!(matches!(result, Err(LinkError::ConsoleClosed)));
        assert_eq!(printed, "Enter Send/Quit/Receive\n");
    }
}
