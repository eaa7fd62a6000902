use mcpskill_core::{load_config_file, ConfigError, ConfigWarning, ServerConfig, TransportKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::write_config;

#[test]
fn test_wrapper_file_selects_first_server_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &json!({
            "mcpServers": {
                "zeta": {"command": "node", "args": ["z.js"]},
                "alpha": {"type": "http", "url": "https://example.com/mcp"}
            }
        }),
    );

    let normalized = load_config_file(&path).unwrap();
    assert_eq!(normalized.server.name(), "zeta");
    assert_eq!(normalized.server.transport_kind(), TransportKind::Stdio);
    assert_eq!(
        normalized.warnings,
        vec![ConfigWarning::MultipleServers {
            selected: "zeta".to_string(),
            discarded: vec!["alpha".to_string()],
        }]
    );
}

#[test]
fn test_direct_file_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &json!({
            "name": "remote",
            "type": "sse",
            "url": "https://example.com/sse",
            "headers": {"Authorization": "Bearer t"}
        }),
    );

    let normalized = load_config_file(&path).unwrap();
    assert!(normalized.warnings.is_empty());
    let ServerConfig::Http(http) = normalized.server else {
        panic!("expected http config");
    };
    assert_eq!(http.url, "https://example.com/sse");
    assert_eq!(http.headers.get("Authorization").map(String::as_str), Some("Bearer t"));
}

#[test]
fn test_normalized_config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &json!({"mcpServers": {"gh": {"command": "npx", "args": ["-y", "server"], "env": {"TOKEN": "x"}}}}),
    );
    let first = load_config_file(&path).unwrap().server;

    let rewritten = write_config(dir.path(), &serde_json::to_value(&first).unwrap());
    let second = load_config_file(&rewritten).unwrap();
    assert_eq!(second.server, first);
    assert!(second.warnings.is_empty());
}

#[test]
fn test_empty_wrapper_and_bad_files() {
    let dir = tempfile::tempdir().unwrap();

    let empty = write_config(dir.path(), &json!({"mcpServers": {}}));
    let err = load_config_file(&empty).unwrap_err();
    assert!(matches!(err.inner(), ConfigError::NoServers));
    assert!(err.to_string().contains(&empty.display().to_string()), "got: {err}");

    let missing = dir.path().join("absent.json");
    assert!(matches!(load_config_file(&missing), Err(ConfigError::NotFound(_))));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(load_config_file(&garbage).is_err());

    let unsupported = write_config(dir.path(), &json!({"type": "websocket", "url": "ws://x"}));
    let err = load_config_file(&unsupported).unwrap_err();
    assert!(err.to_string().contains("Unsupported transport type"), "got: {err}");
}
