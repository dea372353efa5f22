//! Wire types and error definitions shared by the submission pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can end a gateway request early.
///
/// Every variant is reported to the caller as the same `{"message":"fail"}`
/// body; the detail only goes to the logs.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required field is missing or empty, or the body is unreadable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Key material or the numeric value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Network failure, timeout, or unexpected status from the node.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered successfully but with a body we cannot use.
    #[error("Upstream data error: {0}")]
    UpstreamData(String),
}

impl GatewayError {
    /// Short, stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation_failed",
            GatewayError::Decode(_) => "decode_failed",
            GatewayError::Transport(_) => "transport_failed",
            GatewayError::UpstreamData(_) => "upstream_data_failed",
        }
    }

    /// True when the failure originated on the node side rather than with the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(self, GatewayError::Transport(_) | GatewayError::UpstreamData(_))
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Transfer request as sent by a wallet client.
///
/// Every field is optional at the serde level so that a missing field is a
/// validation failure rather than a body rejection.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct TransactionRequest {
    pub sender_blockchain_address: Option<String>,
    pub recipient_blockchain_address: Option<String>,
    pub sender_public_key: Option<String>,
    pub sender_private_key: Option<String>,
    pub value: Option<String>,
}

impl std::fmt::Debug for TransactionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionRequest")
            .field("sender_blockchain_address", &self.sender_blockchain_address)
            .field("recipient_blockchain_address", &self.recipient_blockchain_address)
            .field("sender_public_key", &self.sender_public_key)
            .field("sender_private_key", &self.sender_private_key.as_ref().map(|_| "<redacted>"))
            .field("value", &self.value)
            .finish()
    }
}

/// Signed transaction in the node's ingestion format.
///
/// Deliberately has no private-key field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundTransactionPayload {
    pub sender_blockchain_address: String,
    pub recipient_blockchain_address: String,
    pub sender_public_key: String,
    pub value: f32,
    pub signature: String,
}

/// Body of the node's `GET /amount` reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountResponse {
    pub amount: f32,
}
