//! Shared test utilities and fixtures for mcpskill integration tests.

use std::path::{Path, PathBuf};

pub use echo::EchoServer;

pub use http::TestHttpServer;

/// Write `value` as `config.json` under `dir`
pub fn write_config(dir: &Path, value: &serde_json::Value) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Route test logs through the test harness; `RUST_LOG` controls the level
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
