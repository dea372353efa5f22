//! Caller-facing response bodies.
//!
//! # Design Decisions
//! - Application failures are reported in the body with HTTP 200, never
//!   through the status code; existing wallet clients depend on this
//! - Failure bodies carry no detail about what went wrong

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message value for a successful request.
pub const SUCCESS: &str = "success";

/// Message value for any failed request.
pub const FAIL: &str = "fail";

/// `{"message": "success" | "fail"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { message: SUCCESS.to_string() }
    }

    pub fn fail() -> Self {
        Self { message: FAIL.to_string() }
    }
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{"message": "success", "amount": <f32>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountStatusResponse {
    pub message: String,
    pub amount: f32,
}

impl AmountStatusResponse {
    pub fn success(amount: f32) -> Self {
        Self {
            message: SUCCESS.to_string(),
            amount,
        }
    }
}

impl IntoResponse for AmountStatusResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bodies() {
        assert_eq!(
            serde_json::to_string(&StatusResponse::success()).unwrap(),
            r#"{"message":"success"}"#
        );
        assert_eq!(
            serde_json::to_string(&StatusResponse::fail()).unwrap(),
            r#"{"message":"fail"}"#
        );
        assert_eq!(
            serde_json::to_string(&AmountStatusResponse::success(42.5)).unwrap(),
            r#"{"message":"success","amount":42.5}"#
        );
    }

    #[test]
    fn test_fail_is_http_ok() {
        let response = StatusResponse::fail().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
