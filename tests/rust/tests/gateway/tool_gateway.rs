use std::collections::BTreeMap;

use mcpskill_core::{ServerConfig, StdioConfig, ToolSummary};
use mcpskill_mcp::{Content, GatewayStateKind, McpSkillError, ToolGateway};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

use super::ECHO_SERVER;

fn echo_gateway() -> ToolGateway {
    tests::init_test_tracing();
    ToolGateway::new(ServerConfig::stdio("echo", ECHO_SERVER, vec![]))
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn first_text(content: &[Content]) -> String {
    let value = serde_json::to_value(&content[0]).unwrap();
    assert_eq!(value["type"], "text");
    value["text"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_list_describe_call_share_one_session() {
    let mut gateway = echo_gateway();
    assert_eq!(gateway.state(), GatewayStateKind::Unconnected);

    let tools = gateway.list_tools().await.unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["echo", "get_env", "fail"]);
    assert_eq!(tools[0].description.as_deref(), Some("echoes input"));
    assert_eq!(gateway.state(), GatewayStateKind::Connected);

    let echo = gateway.describe_tool("echo").await.unwrap().unwrap();
    assert_eq!(Value::Object(echo.input_schema), json!({"type": "object"}));

    let content = gateway.call_tool("echo", args(json!({"msg": "hi"}))).await.unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(first_text(&content), r#"{"msg":"hi"}"#);

    assert_eq!(gateway.session_manager().sessions_opened(), 1);
    gateway.close().await.unwrap();
    assert_eq!(gateway.state(), GatewayStateKind::Closed);
}

#[tokio::test]
async fn test_lazy_connect_matches_explicit_connect() {
    let mut lazy = echo_gateway();
    let mut eager = echo_gateway();
    eager.connect().await.unwrap();

    let from_lazy = lazy.list_tools().await.unwrap();
    let from_eager = eager.list_tools().await.unwrap();
    assert_eq!(from_lazy, from_eager);
    assert_eq!(
        from_lazy[0],
        ToolSummary {
            name: "echo".to_string(),
            description: Some("echoes input".to_string()),
        }
    );
    assert_eq!(lazy.session_manager().sessions_opened(), 1);
    assert_eq!(eager.session_manager().sessions_opened(), 1);

    lazy.close().await.unwrap();
    eager.close().await.unwrap();
}

#[tokio::test]
async fn test_describe_absent_tool_is_none() {
    let mut gateway = echo_gateway();
    assert!(gateway.describe_tool("nope").await.unwrap().is_none());
    // Prefix or case variants are not matches
    assert!(gateway.describe_tool("ECHO").await.unwrap().is_none());
    assert!(gateway.describe_tool("ech").await.unwrap().is_none());
    gateway.close().await.unwrap();
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let mut gateway = echo_gateway();
    let err = gateway.call_tool("nope", Map::new()).await.unwrap_err();
    assert!(err.is_protocol(), "got: {err}");

    // The session survives a protocol error
    assert_eq!(gateway.state(), GatewayStateKind::Connected);
    assert_eq!(gateway.list_tools().await.unwrap().len(), 3);
    gateway.close().await.unwrap();
}

#[tokio::test]
async fn test_error_result_is_returned_as_content() {
    let mut gateway = echo_gateway();
    let content = gateway.call_tool("fail", Map::new()).await.unwrap();
    assert_eq!(first_text(&content), "requested failure");
    gateway.close().await.unwrap();
}

#[tokio::test]
async fn test_close_is_idempotent_and_terminal() {
    let mut gateway = echo_gateway();
    gateway.connect().await.unwrap();
    gateway.connect().await.unwrap();
    assert_eq!(gateway.session_manager().sessions_opened(), 1);

    gateway.close().await.unwrap();
    gateway.close().await.unwrap();

    let err = gateway.list_tools().await.unwrap_err();
    assert!(matches!(err, McpSkillError::GatewayClosed));
    assert_eq!(gateway.session_manager().sessions_opened(), 1);
}

#[tokio::test]
async fn test_env_overlays_inherited_environment() {
    tests::init_test_tracing();
    let mut env = BTreeMap::new();
    env.insert("MCPSKILL_TEST_OVERLAY".to_string(), "from-config".to_string());
    let config = ServerConfig::Stdio(StdioConfig {
        name: "echo-env".to_string(),
        description: None,
        command: ECHO_SERVER.to_string(),
        args: vec![],
        env,
    });

    let mut gateway = ToolGateway::new(config);
    let overlay = gateway
        .call_tool("get_env", args(json!({"name": "MCPSKILL_TEST_OVERLAY"})))
        .await
        .unwrap();
    assert_eq!(first_text(&overlay), "from-config");

    let path = gateway
        .call_tool("get_env", args(json!({"name": "PATH"})))
        .await
        .unwrap();
    assert_eq!(first_text(&path), std::env::var("PATH").unwrap_or_default());
    gateway.close().await.unwrap();
}
