//! Key material resolution and signing.
//!
//! # Security
//! - Key pairs live for exactly one request and are never cached
//! - Private keys are never logged or serialized
//! - `SigningKey` zeroizes its scalar on drop

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

use crate::blockchain::types::{GatewayError, GatewayResult};

/// Hex length of an uncompressed public key without the SEC1 tag (X ‖ Y).
pub const PUBLIC_KEY_HEX_LEN: usize = 128;

/// Hex length of a private scalar.
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Hex length of a serialized signature (R ‖ S).
pub const SIGNATURE_HEX_LEN: usize = 128;

/// Key decoding and signing capability.
///
/// The pipeline only ever talks to keys through this trait, so the curve and
/// encoding can be swapped (or instrumented in tests) without touching the
/// orchestration.
pub trait KeyMaterial: Send + Sync + 'static {
    type PublicKey: Send + Sync;
    type PrivateKey: Send + Sync;
    type Signature: Send + Sync;

    /// Decode a public key from its string form.
    fn decode_public_key(&self, encoded: &str) -> GatewayResult<Self::PublicKey>;

    /// Decode a private key, checking it belongs to `public_key`.
    fn decode_private_key(
        &self,
        encoded: &str,
        public_key: &Self::PublicKey,
    ) -> GatewayResult<Self::PrivateKey>;

    /// Canonical string form of a public key, as forwarded to the node.
    fn encode_public_key(&self, public_key: &Self::PublicKey) -> String;

    /// Sign `message` (the canonical transaction bytes).
    fn sign(&self, message: &[u8], private_key: &Self::PrivateKey) -> GatewayResult<Self::Signature>;

    /// String form of a signature as sent on the wire.
    fn encode_signature(&self, signature: &Self::Signature) -> String;

    /// Parse a signature from its wire form.
    fn decode_signature(&self, encoded: &str) -> GatewayResult<Self::Signature>;

    /// Check `signature` over `message` under `public_key`.
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::Signature,
        public_key: &Self::PublicKey,
    ) -> bool;
}

/// A resolved key pair, scoped to a single request.
pub struct KeyPair<K: KeyMaterial> {
    pub public_key: K::PublicKey,
    pub private_key: K::PrivateKey,
}

/// Resolve both halves of a key pair from their encoded forms.
///
/// The public key is decoded first because the private-key decoder validates
/// against it.
pub fn resolve_key_pair<K: KeyMaterial>(
    keys: &K,
    public_key: &str,
    private_key: &str,
) -> GatewayResult<KeyPair<K>> {
    let public_key = keys.decode_public_key(public_key)?;
    let private_key = keys.decode_private_key(private_key, &public_key)?;
    Ok(KeyPair { public_key, private_key })
}

/// ECDSA over NIST P-256 with SHA-256 message hashing.
///
/// Encodings:
/// - public key: 128 hex chars, X ‖ Y big-endian
/// - private key: 64 hex chars, scalar D big-endian
/// - signature: 128 lowercase hex chars, R ‖ S zero-padded
#[derive(Debug, Clone, Copy, Default)]
pub struct P256Keys;

impl P256Keys {
    /// Encode a signing key's scalar as 64 hex chars.
    pub fn encode_private_key(private_key: &SigningKey) -> String {
        hex::encode(private_key.to_bytes())
    }
}

fn decode_hex(encoded: &str, expected_len: usize, what: &str) -> GatewayResult<Vec<u8>> {
    let trimmed = encoded.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != expected_len {
        return Err(GatewayError::Decode(format!(
            "{} must be {} hex characters, got {}",
            what,
            expected_len,
            digits.len()
        )));
    }
    hex::decode(digits).map_err(|e| GatewayError::Decode(format!("{} is not valid hex: {}", what, e)))
}

impl KeyMaterial for P256Keys {
    type PublicKey = VerifyingKey;
    type PrivateKey = SigningKey;
    type Signature = Signature;

    fn decode_public_key(&self, encoded: &str) -> GatewayResult<VerifyingKey> {
        let xy = decode_hex(encoded, PUBLIC_KEY_HEX_LEN, "public key")?;

        let mut sec1 = Vec::with_capacity(1 + xy.len());
        sec1.push(0x04);
        sec1.extend_from_slice(&xy);

        VerifyingKey::from_sec1_bytes(&sec1)
            .map_err(|_| GatewayError::Decode("public key is not a point on P-256".to_string()))
    }

    fn decode_private_key(&self, encoded: &str, public_key: &VerifyingKey) -> GatewayResult<SigningKey> {
        let scalar = decode_hex(encoded, PRIVATE_KEY_HEX_LEN, "private key")?;

        let signing_key = SigningKey::from_slice(&scalar)
            .map_err(|_| GatewayError::Decode("private key is not a valid P-256 scalar".to_string()))?;

        let derived = signing_key.verifying_key().to_encoded_point(false);
        if derived != public_key.to_encoded_point(false) {
            return Err(GatewayError::Decode(
                "private key does not match public key".to_string(),
            ));
        }

        Ok(signing_key)
    }

    fn encode_public_key(&self, public_key: &VerifyingKey) -> String {
        let point = public_key.to_encoded_point(false);
        // Skip the 0x04 uncompressed tag.
        hex::encode(&point.as_bytes()[1..])
    }

    fn sign(&self, message: &[u8], private_key: &SigningKey) -> GatewayResult<Signature> {
        private_key
            .try_sign(message)
            .map_err(|e| GatewayError::Decode(format!("Signing failed: {}", e)))
    }

    fn encode_signature(&self, signature: &Signature) -> String {
        hex::encode(signature.to_bytes())
    }

    fn decode_signature(&self, encoded: &str) -> GatewayResult<Signature> {
        let bytes = decode_hex(encoded, SIGNATURE_HEX_LEN, "signature")?;
        Signature::from_slice(&bytes)
            .map_err(|_| GatewayError::Decode("signature scalars out of range".to_string()))
    }

    fn verify(&self, message: &[u8], signature: &Signature, public_key: &VerifyingKey) -> bool {
        public_key.verify(message, signature).is_ok()
    }
}
