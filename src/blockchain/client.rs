//! HTTP client for the blockchain node.
//!
//! # Responsibilities
//! - Submit signed transactions to the node's ingestion endpoint
//! - Query balances by blockchain address
//! - Bound every call with connect and request timeouts
//! - Map status codes and bodies into a local verdict

use reqwest::StatusCode;
use std::time::{Duration, Instant};
use url::Url;

use crate::blockchain::types::{AmountResponse, GatewayError, GatewayResult, OutboundTransactionPayload};
use crate::config::NodeConfig;
use crate::observability::metrics;

/// Node path that ingests signed transactions.
pub const TRANSACTIONS_PATH: &str = "/transactions";

/// Node path that reports balances.
pub const AMOUNT_PATH: &str = "/amount";

/// Client for the node's HTTP API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    /// Node base URL without a trailing slash.
    base_url: String,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl GatewayClient {
    /// Create a new node client.
    ///
    /// Fails only if the base URL does not parse or the TLS backend cannot
    /// be initialized.
    pub fn new(config: &NodeConfig) -> GatewayResult<Self> {
        let base_url = config.gateway_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            GatewayError::Transport(format!("Invalid gateway URL '{}': {}", config.gateway_url, e))
        })?;

        let timeout_duration = Duration::from_secs(config.request_timeout_secs);
        let mut builder = reqwest::Client::builder()
            .timeout(timeout_duration)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(
            gateway_url = %base_url,
            timeout_secs = config.request_timeout_secs,
            "Gateway client initialized"
        );

        Ok(Self {
            http,
            base_url,
            timeout_duration,
        })
    }

    /// Node base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a signed transaction. Only `201 Created` counts as success.
    pub async fn submit(&self, payload: &OutboundTransactionPayload) -> GatewayResult<()> {
        let endpoint = format!("{}{}", self.base_url, TRANSACTIONS_PATH);
        let start = Instant::now();

        let result = self.http.post(&endpoint).json(payload).send().await;
        metrics::record_upstream("submit", start);

        let response = result.map_err(|e| self.transport_error(&endpoint, e))?;
        let status = response.status();

        tracing::debug!(endpoint = %endpoint, status = %status, "Node answered submission");

        if status == StatusCode::CREATED {
            Ok(())
        } else {
            Err(GatewayError::Transport(format!(
                "node rejected transaction with status {}",
                status
            )))
        }
    }

    /// Query the balance held by `address`.
    pub async fn query_balance(&self, address: &str) -> GatewayResult<f32> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, AMOUNT_PATH))
            .map_err(|e| GatewayError::Transport(format!("Invalid amount URL: {}", e)))?;
        url.query_pairs_mut().append_pair("blockchain_address", address);
        let endpoint = url.to_string();
        let start = Instant::now();

        let result = self.http.get(url).send().await;
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream("balance", start);
                return Err(self.transport_error(&endpoint, e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            metrics::record_upstream("balance", start);
            return Err(GatewayError::Transport(format!(
                "node answered balance query with status {}",
                status
            )));
        }

        let body = response.bytes().await;
        metrics::record_upstream("balance", start);
        let body = body.map_err(|e| self.transport_error(&endpoint, e))?;

        let parsed: AmountResponse = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::UpstreamData(format!("malformed amount body: {}", e)))?;

        if !parsed.amount.is_finite() {
            return Err(GatewayError::UpstreamData("amount is not finite".to_string()));
        }

        Ok(parsed.amount)
    }

    fn transport_error(&self, endpoint: &str, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Transport(format!(
                "{} timed out after {} seconds",
                endpoint,
                self.timeout_duration.as_secs()
            ))
        } else {
            GatewayError::Transport(format!("{} unreachable: {}", endpoint, error))
        }
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
