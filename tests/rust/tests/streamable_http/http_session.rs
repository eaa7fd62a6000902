use std::collections::BTreeMap;

use mcpskill_core::{HttpConfig, HttpKind, ServerConfig};
use mcpskill_mcp::{GatewayStateKind, SessionManager, ToolGateway, TransportType};
use pretty_assertions::assert_eq;
use serde_json::{json, Map};
use tests::TestHttpServer;

fn http_config(url: &str, headers: &[(&str, &str)]) -> ServerConfig {
    ServerConfig::Http(HttpConfig {
        name: "echo-http".to_string(),
        description: None,
        kind: HttpKind::Http,
        url: url.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_session_selects_streamable_http() {
    tests::init_test_tracing();
    let server = TestHttpServer::start("x-test-token").await;

    let manager = SessionManager::new();
    let session = manager.open(&http_config(&server.url, &[])).await.unwrap();
    assert_eq!(session.transport_type(), TransportType::StreamableHttp);

    let tools = session.list_tools().await.unwrap();
    assert_eq!(tools[0].name, "echo");
    session.close().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_headers_sent_on_every_request() {
    let server = TestHttpServer::start("x-test-token").await;
    let mut gateway = ToolGateway::new(http_config(&server.url, &[("X-Test-Token", "secret-123")]));

    gateway.list_tools().await.unwrap();
    let content = gateway
        .call_tool("echo", json!({"a": "b"}).as_object().cloned().unwrap())
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&content[0]).unwrap()["text"], r#"{"a":"b"}"#);
    gateway.close().await.unwrap();

    let seen = server.seen_headers();
    // initialize, initialized, tools/list, tools/call at minimum
    assert!(seen.len() >= 4, "only {} requests recorded", seen.len());
    for value in &seen {
        assert_eq!(
            value.as_deref(),
            Some("secret-123"),
            "{} missing on a request",
            server.watched_header()
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sse_type_uses_streamable_http() {
    let server = TestHttpServer::start("x-test-token").await;
    let mut config = http_config(&server.url, &[]);
    if let ServerConfig::Http(http) = &mut config {
        http.kind = HttpKind::Sse;
    }

    let mut gateway = ToolGateway::new(config);
    assert!(gateway.describe_tool("echo").await.unwrap().is_some());
    gateway.close().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_tool_over_http_keeps_session() {
    let server = TestHttpServer::start("x-test-token").await;
    let mut gateway = ToolGateway::new(http_config(&server.url, &[]));

    let err = gateway.call_tool("missing", Map::new()).await.unwrap_err();
    assert!(err.is_protocol(), "got: {err}");
    assert_eq!(gateway.state(), GatewayStateKind::Connected);
    gateway.close().await.unwrap();
}

#[tokio::test]
async fn test_nothing_listening_is_connection_error() {
    // Bind then drop to get a port with no listener
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut gateway = ToolGateway::new(http_config(&format!("http://127.0.0.1:{}/mcp", port), &[]));
    let err = gateway.list_tools().await.unwrap_err();
    assert!(err.is_connection(), "got: {err}");
    assert_eq!(gateway.state(), GatewayStateKind::Unconnected);
}
