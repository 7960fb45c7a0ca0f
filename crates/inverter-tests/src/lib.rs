//! Shared harness for bridge integration tests
//!
//! The bridge loop is generic over its byte streams, so the harness runs
//! it against in-memory pipes: feed a block of input lines, let the loop
//! run to end-of-input, then collect everything it wrote.

use std::sync::Arc;
use std::time::Duration;

use inverter_core::{ConnectParams, MockConfig, MockConnector, Protocol};
use inverterd::{run_bridge, Session};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

/// Connection parameters pointing at a documentation address
pub fn test_params() -> ConnectParams {
    ConnectParams {
        host: "192.0.2.1".into(),
        port: Protocol::Udp.default_port(),
        timeout: Duration::from_secs(5),
        retries: 20,
    }
}

/// A fresh mock connector for one test
pub fn mock_connector() -> Arc<MockConnector> {
    Arc::new(MockConnector::new(&MockConfig::default()))
}

/// Run `input` through a complete bridge session and return the raw
/// output lines produced before end-of-input shut the loop down.
pub async fn run_lines(connector: Arc<MockConnector>, input: &str) -> Vec<String> {
    let session = Session::new(connector, test_params());

    let (mut stdin_tx, stdin_rx) = tokio::io::duplex(64 * 1024);
    let (stdout_tx, mut stdout_rx) = tokio::io::duplex(64 * 1024);

    let bridge = tokio::spawn(run_bridge(BufReader::new(stdin_rx), stdout_tx, session));

    stdin_tx
        .write_all(input.as_bytes())
        .await
        .expect("write test input");
    drop(stdin_tx);

    bridge
        .await
        .expect("bridge task panicked")
        .expect("bridge loop failed");

    let mut out = String::new();
    stdout_rx
        .read_to_string(&mut out)
        .await
        .expect("read bridge output");
    out.lines().map(str::to_owned).collect()
}

/// Like [`run_lines`] but with each line parsed back to JSON
pub async fn run_json(connector: Arc<MockConnector>, input: &str) -> Vec<serde_json::Value> {
    run_lines(connector, input)
        .await
        .iter()
        .map(|line| serde_json::from_str(line).expect("reply line is valid JSON"))
        .collect()
}
