//! Shared utilities for integration tests: a programmable mock node and a
//! gateway spawned against it.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    http::{Method, StatusCode, Uri},
    Router,
};
use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use wallet_gateway::blockchain::{KeyMaterial, P256Keys};
use wallet_gateway::config::{validate_config, GatewayConfig};
use wallet_gateway::{HttpServer, Shutdown};

/// One request as seen by the mock node.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Bytes,
}

impl Received {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("node received non-JSON body")
    }
}

/// What the mock node answers.
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn status(status: u16) -> Self {
        Self { status, body: String::new(), delay: None }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self { status, body: body.to_string(), delay: None }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a mock node on an ephemeral port whose replies come from `f`.
pub async fn start_programmable_node<F>(f: F) -> MockNode
where
    F: Fn(&Received) -> Reply + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    let app = Router::new().fallback(move |method: Method, uri: Uri, body: Bytes| {
        let f = f.clone();
        let log = log.clone();
        async move {
            let request = Received {
                method,
                path: uri.path().to_string(),
                query: uri.query().map(str::to_string),
                body,
            };
            let reply = f(&request);
            log.lock().unwrap().push(request);

            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            (StatusCode::from_u16(reply.status).unwrap(), reply.body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockNode { addr, received }
}

/// A base URL with nothing listening behind it.
pub fn dead_node_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Gateway config pointed at `node_url`, tuned for tests.
pub fn test_config(node_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.node.gateway_url = node_url.to_string();
    config.node.request_timeout_secs = 1;
    config.node.connect_timeout_secs = 1;
    config.node.bypass_proxy = true;
    config
}

/// A gateway serving on an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(node_url: &str) -> TestGateway {
    let config = test_config(node_url);
    validate_config(&config).expect("test config rejected by validation");
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway { addr, shutdown }
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// Fresh key pair in wire encoding: (public hex, private hex).
pub fn fresh_keys() -> (String, String) {
    let signing_key = SigningKey::random(&mut OsRng);
    (
        P256Keys.encode_public_key(signing_key.verifying_key()),
        P256Keys::encode_private_key(&signing_key),
    )
}

/// A complete transfer request body.
pub fn transfer_body(sender: &str, recipient: &str, value: &str) -> serde_json::Value {
    let (public_key, private_key) = fresh_keys();
    serde_json::json!({
        "sender_blockchain_address": sender,
        "recipient_blockchain_address": recipient,
        "sender_public_key": public_key,
        "sender_private_key": private_key,
        "value": value,
    })
}
