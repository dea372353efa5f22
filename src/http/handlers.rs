//! Caller-facing endpoint handlers.
//!
//! Every handler answers HTTP 200 with a status body for application
//! outcomes; only a wrong method gets a non-200 status.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::Instrument;

use crate::blockchain::types::{GatewayError, TransactionRequest};
use crate::http::request::request_id;
use crate::http::response::{AmountStatusResponse, HealthResponse, StatusResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query string of `GET /wallet/amount`.
#[derive(Debug, Deserialize)]
pub struct AmountQuery {
    pub blockchain_address: Option<String>,
}

/// `POST /transaction`: sign and forward a transfer.
pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusResponse {
    let span = tracing::info_span!("transaction", request_id = %request_id(&headers));

    async move {
        let result = match serde_json::from_slice::<TransactionRequest>(&body) {
            Ok(request) => state.gateway.submit_transaction(&request).await,
            Err(e) => {
                tracing::warn!(stage = "decode_body", error = %e, "Unreadable transaction request");
                Err(GatewayError::Validation(format!("unreadable body: {}", e)))
            }
        };
        metrics::record_transaction(&result);

        match result {
            Ok(()) => {
                tracing::info!("Transaction accepted by node");
                StatusResponse::success()
            }
            Err(_) => StatusResponse::fail(),
        }
    }
    .instrument(span)
    .await
}

/// `GET /wallet/amount?blockchain_address=<addr>`: relay the node's balance.
pub async fn wallet_amount(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<AmountQuery>, QueryRejection>,
) -> Response {
    let span = tracing::info_span!("wallet_amount", request_id = %request_id(&headers));

    async move {
        let address = match &query {
            Ok(Query(q)) => q.blockchain_address.as_deref(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable balance query");
                None
            }
        };

        let result = state.gateway.wallet_amount(address).await;
        metrics::record_balance_query(&result);

        match result {
            Ok(amount) => AmountStatusResponse::success(amount).into_response(),
            Err(_) => StatusResponse::fail().into_response(),
        }
    }
    .instrument(span)
    .await
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Any unsupported method on a known path.
pub async fn invalid_method(method: Method, uri: Uri) -> StatusCode {
    tracing::warn!(method = %method, path = %uri.path(), "Invalid HTTP method");
    StatusCode::BAD_REQUEST
}
