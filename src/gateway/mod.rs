//! Transaction gateway orchestration.
//!
//! # Request State Machine
//! ```text
//! RECEIVED ─validate─▶ VALID ─resolve keys─▶ KEYED ─parse value─▶ PARSED
//!     │                  │                     │                    │
//!     ▼                  ▼                     ▼                   sign
//!   FAILED             FAILED                FAILED                 ▼
//!                                                                SIGNED ─submit─▶ SUCCEEDED | FAILED
//! ```
//!
//! Each request ends in exactly one terminal state. No state survives the
//! request, so nothing needs rolling back on failure.

pub mod service;

pub use service::TransactionGateway;
