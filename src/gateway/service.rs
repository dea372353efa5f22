//! Pipeline orchestration for submissions and balance queries.

use std::sync::Arc;

use crate::blockchain::client::GatewayClient;
use crate::blockchain::transaction::{parse_value, TransactionSigner};
use crate::blockchain::types::{GatewayError, GatewayResult, TransactionRequest};
use crate::blockchain::wallet::{resolve_key_pair, KeyMaterial, P256Keys};
use crate::config::NodeConfig;

/// Runs the submission pipeline for one request at a time.
///
/// Holds only immutable, shareable pieces; concurrent requests share one
/// instance behind an `Arc`.
pub struct TransactionGateway<K: KeyMaterial = P256Keys> {
    signer: TransactionSigner<K>,
    client: GatewayClient,
}

impl TransactionGateway<P256Keys> {
    /// Build the production gateway (P-256 keys) for the configured node.
    pub fn from_config(config: &NodeConfig) -> GatewayResult<Self> {
        Ok(Self::new(Arc::new(P256Keys), GatewayClient::new(config)?))
    }
}

/// Log a pipeline failure with the stage it happened in.
fn failed(stage: &'static str, error: GatewayError) -> GatewayError {
    if error.is_upstream() {
        tracing::error!(stage, kind = error.kind(), error = %error, "Pipeline stage failed");
    } else {
        tracing::warn!(stage, kind = error.kind(), error = %error, "Pipeline stage failed");
    }
    error
}

impl<K: KeyMaterial> TransactionGateway<K> {
    /// Create a gateway from a key capability and a node client.
    pub fn new(keys: Arc<K>, client: GatewayClient) -> Self {
        Self {
            signer: TransactionSigner::new(keys),
            client,
        }
    }

    /// Validate, sign, and forward a transfer request.
    ///
    /// Stops at the first failing stage; `Ok(())` means the node accepted
    /// the transaction with `201 Created`.
    pub async fn submit_transaction(&self, request: &TransactionRequest) -> GatewayResult<()> {
        let fields = request.validated().map_err(|e| failed("validate", e))?;

        let payload = {
            let key_pair = resolve_key_pair(
                self.signer.keys(),
                fields.sender_public_key,
                fields.sender_private_key,
            )
            .map_err(|e| failed("resolve_keys", e))?;

            let value = parse_value(fields.value).map_err(|e| failed("parse_value", e))?;

            let transaction = self
                .signer
                .sign(
                    fields.sender_blockchain_address,
                    fields.recipient_blockchain_address,
                    value,
                    &key_pair,
                )
                .map_err(|e| failed("sign", e))?;

            self.signer.into_payload(transaction)
        };

        tracing::debug!(
            sender = %payload.sender_blockchain_address,
            recipient = %payload.recipient_blockchain_address,
            value = payload.value,
            "Submitting signed transaction"
        );

        self.client
            .submit(&payload)
            .await
            .map_err(|e| failed("submit", e))
    }

    /// Look up the balance of `address` on the node.
    pub async fn wallet_amount(&self, address: Option<&str>) -> GatewayResult<f32> {
        // Blank means missing; anything else is forwarded untouched.
        let address = address
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                failed(
                    "validate",
                    GatewayError::Validation("missing blockchain_address".to_string()),
                )
            })?;

        self.client
            .query_balance(address)
            .await
            .map_err(|e| failed("query_balance", e))
    }
}
