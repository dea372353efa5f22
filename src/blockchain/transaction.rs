//! Request validation, transaction construction, and signing.
//!
//! # Responsibilities
//! - Reject incomplete requests before any key is touched
//! - Parse and narrow the transfer value to `f32` exactly once
//! - Build the canonical bytes the node verifies signatures against
//! - Sign and convert to the outbound wire payload

use std::sync::Arc;

use crate::blockchain::types::{
    GatewayError, GatewayResult, OutboundTransactionPayload, TransactionRequest,
};
use crate::blockchain::wallet::{KeyMaterial, KeyPair};

/// Borrowed view of a request that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub sender_blockchain_address: &'a str,
    pub recipient_blockchain_address: &'a str,
    pub sender_public_key: &'a str,
    pub sender_private_key: &'a str,
    pub value: &'a str,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl TransactionRequest {
    /// Name of the first required field that is missing or empty.
    pub fn missing_field(&self) -> Option<&'static str> {
        let fields = [
            ("sender_blockchain_address", &self.sender_blockchain_address),
            ("recipient_blockchain_address", &self.recipient_blockchain_address),
            ("sender_public_key", &self.sender_public_key),
            ("sender_private_key", &self.sender_private_key),
            ("value", &self.value),
        ];
        fields
            .into_iter()
            .find(|(_, value)| present(value).is_none())
            .map(|(name, _)| name)
    }

    /// True when all five required fields are present and non-empty.
    ///
    /// Does not look inside `value`.
    pub fn validate(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Borrow the request's fields once it is known to be complete.
    pub fn validated(&self) -> GatewayResult<ValidatedRequest<'_>> {
        let missing = |name: &str| GatewayError::Validation(format!("missing field: {}", name));
        Ok(ValidatedRequest {
            sender_blockchain_address: present(&self.sender_blockchain_address)
                .ok_or_else(|| missing("sender_blockchain_address"))?,
            recipient_blockchain_address: present(&self.recipient_blockchain_address)
                .ok_or_else(|| missing("recipient_blockchain_address"))?,
            sender_public_key: present(&self.sender_public_key)
                .ok_or_else(|| missing("sender_public_key"))?,
            sender_private_key: present(&self.sender_private_key)
                .ok_or_else(|| missing("sender_private_key"))?,
            value: present(&self.value).ok_or_else(|| missing("value"))?,
        })
    }
}

/// Parse a decimal amount straight to `f32`.
///
/// Parsing directly at `f32` gives the correctly rounded value in one step,
/// so the narrowed value is what both the signature and the wire carry.
pub fn parse_value(raw: &str) -> GatewayResult<f32> {
    let value: f32 = raw
        .parse()
        .map_err(|e| GatewayError::Decode(format!("value '{}' is not a number: {}", raw, e)))?;

    if !value.is_finite() {
        return Err(GatewayError::Decode(format!("value '{}' is out of range", raw)));
    }
    if value.is_sign_negative() {
        return Err(GatewayError::Decode(format!("value '{}' is negative", raw)));
    }
    Ok(value)
}

/// Render an `f32` the way the node's JSON encoder does.
///
/// Shortest round-tripping digits; plain notation for magnitudes in
/// `[1e-6, 1e21)` and zero, exponent notation otherwise (`1e-7`, `1e+21`).
pub fn format_value(value: f32) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let rendered = format!("{:e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => rendered,
    }
}

/// JSON string literal with HTML-sensitive characters escaped.
fn json_string(raw: &str) -> String {
    serde_json::Value::String(raw.to_owned())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Bytes covered by a transaction signature.
pub fn canonical_message(sender: &str, recipient: &str, value: f32) -> Vec<u8> {
    format!(
        "{{\"sender_blockchain_address\":{},\"recipient_blockchain_address\":{},\"value\":{}}}",
        json_string(sender),
        json_string(recipient),
        format_value(value),
    )
    .into_bytes()
}

/// A signed transfer, alive for one request.
pub struct Transaction<K: KeyMaterial> {
    pub sender_blockchain_address: String,
    pub recipient_blockchain_address: String,
    pub sender_public_key: String,
    pub value: f32,
    pub signature: K::Signature,
}

impl<K: KeyMaterial> Transaction<K> {
    /// The bytes this transaction's signature covers.
    pub fn canonical_message(&self) -> Vec<u8> {
        canonical_message(
            &self.sender_blockchain_address,
            &self.recipient_blockchain_address,
            self.value,
        )
    }
}

/// Builds and signs transactions with an injected key capability.
pub struct TransactionSigner<K: KeyMaterial> {
    keys: Arc<K>,
}

impl<K: KeyMaterial> Clone for TransactionSigner<K> {
    fn clone(&self) -> Self {
        Self { keys: self.keys.clone() }
    }
}

impl<K: KeyMaterial> TransactionSigner<K> {
    /// Create a new signer.
    pub fn new(keys: Arc<K>) -> Self {
        Self { keys }
    }

    /// The key capability this signer delegates to.
    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Sign a transfer of an already-narrowed `value`.
    pub fn sign(
        &self,
        sender: &str,
        recipient: &str,
        value: f32,
        key_pair: &KeyPair<K>,
    ) -> GatewayResult<Transaction<K>> {
        let message = canonical_message(sender, recipient, value);
        let signature = self.keys.sign(&message, &key_pair.private_key)?;

        Ok(Transaction {
            sender_blockchain_address: sender.to_string(),
            recipient_blockchain_address: recipient.to_string(),
            sender_public_key: self.keys.encode_public_key(&key_pair.public_key),
            value,
            signature,
        })
    }

    /// Check a transaction's signature under `public_key`.
    pub fn verify(&self, transaction: &Transaction<K>, public_key: &K::PublicKey) -> bool {
        self.keys
            .verify(&transaction.canonical_message(), &transaction.signature, public_key)
    }

    /// Convert to the node's wire format, consuming the transaction.
    pub fn into_payload(&self, transaction: Transaction<K>) -> OutboundTransactionPayload {
        OutboundTransactionPayload {
            signature: self.keys.encode_signature(&transaction.signature),
            sender_blockchain_address: transaction.sender_blockchain_address,
            recipient_blockchain_address: transaction.recipient_blockchain_address,
            sender_public_key: transaction.sender_public_key,
            value: transaction.value,
        }
    }
}
