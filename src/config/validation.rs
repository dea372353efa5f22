//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Keep the inbound timeout longer than a node call, so callers get the
//!   fail body instead of a bare 408
//! - Check the node URL is something the HTTP client can call
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("node.gateway_url '{url}' is invalid: {reason}")]
    InvalidGatewayUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error(
        "timeouts.request_secs ({inbound}) must exceed node.request_timeout_secs ({node})"
    )]
    InboundTimeoutTooShort { inbound: u64, node: u64 },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_format '{0}' must be \"pretty\" or \"json\"")]
    UnknownLogFormat(String),
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if let Err(reason) = check_gateway_url(&config.node.gateway_url) {
        errors.push(ValidationError::InvalidGatewayUrl {
            url: config.node.gateway_url.clone(),
            reason,
        });
    }

    let positive = [
        ("node.request_timeout_secs", config.node.request_timeout_secs),
        ("node.connect_timeout_secs", config.node.connect_timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("security.max_body_size", config.security.max_body_size as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::ZeroValue { field });
        }
    }

    let inbound = config.timeouts.request_secs;
    let node = config.node.request_timeout_secs;
    if inbound > 0 && node > 0 && inbound <= node {
        errors.push(ValidationError::InboundTimeoutTooShort { inbound, node });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if !matches!(observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::UnknownLogFormat(observability.log_format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_gateway_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
