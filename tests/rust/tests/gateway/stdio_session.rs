use mcpskill_core::ServerConfig;
use mcpskill_mcp::{introspect_server, SessionManager, SessionOptions, TransportType};
use std::time::Duration;

use super::ECHO_SERVER;

#[tokio::test]
async fn test_open_stdio_session_handshakes_once() {
    tests::init_test_tracing();
    let manager = SessionManager::new();
    let session = manager
        .open(&ServerConfig::stdio("echo", ECHO_SERVER, vec![]))
        .await
        .unwrap();

    assert_eq!(session.transport_type(), TransportType::Stdio);
    assert_eq!(session.server_name(), "echo");
    let peer = session.peer_info().expect("handshake stores server info");
    assert_eq!(peer.server_info.name, "echo-mcp-server");

    assert_eq!(session.list_tools().await.unwrap().len(), 3);
    session.close().await.unwrap();
    assert_eq!(manager.sessions_opened(), 1);
}

#[tokio::test]
async fn test_handshake_timeout_does_not_fire_for_live_server() {
    let manager = SessionManager::with_options(
        SessionOptions::default().with_handshake_timeout(Duration::from_secs(30)),
    );
    let session = manager
        .open(&ServerConfig::stdio("echo", ECHO_SERVER, vec![]))
        .await
        .unwrap();
    session.close().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_handshake_timeout_fires_for_silent_process() {
    // `sleep` never answers the initialize request
    let config = ServerConfig::stdio("silent", "sleep", vec!["30".to_string()]);
    let manager = SessionManager::with_options(
        SessionOptions::default().with_handshake_timeout(Duration::from_millis(300)),
    );
    let Err(err) = manager.open(&config).await else {
        panic!("a silent process must not complete the handshake");
    };
    assert!(err.is_connection());
    assert!(err.to_string().contains("timeout"), "got: {err}");
    assert_eq!(manager.sessions_opened(), 0);
}

#[tokio::test]
async fn test_introspect_server_lists_and_closes() {
    let tools = introspect_server(
        &ServerConfig::stdio("echo", ECHO_SERVER, vec![]),
        SessionOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(tools[0].name, "echo");
    assert_eq!(tools[1].input_schema["required"], serde_json::json!(["name"]));
}
