//! Blockchain-facing subsystem: the transaction submission pipeline parts.
//!
//! # Data Flow
//! ```text
//! TransactionRequest (caller JSON)
//!     → transaction.rs (validate, parse value)
//!     → wallet.rs (resolve key pair via KeyMaterial)
//!     → transaction.rs (canonical bytes, sign, wire payload)
//!     → client.rs (POST /transactions, GET /amount with timeouts)
//! ```
//!
//! # Security Constraints
//! - Private keys never leave the request that carried them
//! - Never log private keys or sensitive data
//! - All node calls have configurable timeouts
//! - Node failures degrade to a fail verdict, never a crash

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::GatewayClient;
pub use transaction::{Transaction, TransactionSigner};
pub use types::{GatewayError, GatewayResult, OutboundTransactionPayload, TransactionRequest};
pub use wallet::{KeyMaterial, KeyPair, P256Keys};
