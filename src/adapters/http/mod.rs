//! HTTP Inbound Adapter - Payment Verification API
//!
//! Exposes the narrow request/response contract the rest of the
//! platform calls into:
//! - `POST /payments/verify` - verify one on-chain payment
//! - `GET /payments/status/{chain}/{reference}` - poll chain state
//! - `GET /fees` - aggregated fee snapshot
//! - `GET /fees/info` - platform posting prices and admin wallets
//! - `/live`, `/ready`, `/metrics` - operational endpoints
//!
//! This layer is transport glue only: request parsing, response
//! shaping, per-request IDs and metric recording. All verification
//! behavior lives in the use cases.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::info;
use uuid::Uuid;

use crate::adapters::metrics::MetricsRegistry;
use crate::config::{AdminWalletConfig, PlatformFeeConfig};
use crate::domain::fees::FeeSnapshot;
use crate::domain::verification::{ChainId, VerificationResult};
use crate::usecases::dispatcher::{TransactionStatus, VerificationDispatcher};
use crate::usecases::fee_oracle::FeeOracle;

/// Platform fee information served at `/fees/info`.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformFeeInfo {
  /// Posting price per chain.
  pub fees: PlatformFeeConfig,
  /// Admin wallet addresses payments must go to.
  pub admin_wallets: AdminWalletConfig,
}

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct ApiState {
  pub dispatcher: Arc<VerificationDispatcher>,
  pub fee_oracle: Arc<FeeOracle>,
  pub metrics: Arc<MetricsRegistry>,
  pub fee_info: Arc<PlatformFeeInfo>,
  /// Readiness flag, flipped false during graceful shutdown.
  pub ready: watch::Receiver<bool>,
}

/// Payment verification request body.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
  /// Chain-specific transaction identifier.
  pub reference: String,
  /// Minimum transfer value in the chain's native unit.
  pub expected_amount: Decimal,
  /// Chain name, matched case-insensitively.
  pub chain: String,
}

/// Payment verification response body.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
  pub success: bool,
  pub message: String,
  pub request_id: Uuid,
  pub data: VerificationResult,
}

/// Flat error body for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub message: String,
}

/// Build the API router over shared state.
pub fn router(state: ApiState) -> Router {
  Router::new()
    .route("/payments/verify", post(verify_payment))
    .route("/payments/status/:chain/:reference", get(transaction_status))
    .route("/fees", get(fee_snapshot))
    .route("/fees/info", get(fee_info))
    .route("/live", get(|| async { StatusCode::OK }))
    .route("/ready", get(ready))
    .route("/metrics", get(metrics))
    .with_state(state)
}

/// Serve the API until the shutdown signal fires.
pub async fn serve(
  state: ApiState,
  bind_address: &str,
  mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
  let app = router(state);
  let listener = tokio::net::TcpListener::bind(bind_address).await?;
  info!(address = %bind_address, "API server listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(async move {
      let _ = shutdown_rx.recv().await;
    })
    .await?;

  Ok(())
}

/// Reject structurally invalid requests before touching the network.
fn validate_request(request: &VerifyPaymentRequest) -> Result<(), &'static str> {
  if request.reference.trim().is_empty() {
    return Err("transaction reference is required");
  }
  if request.expected_amount < Decimal::ZERO {
    return Err("expected_amount must not be negative");
  }
  Ok(())
}

async fn verify_payment(
  State(state): State<ApiState>,
  Json(request): Json<VerifyPaymentRequest>,
) -> Response {
  let request_id = Uuid::new_v4();

  if let Err(message) = validate_request(&request) {
    return (
      StatusCode::BAD_REQUEST,
      Json(ErrorResponse {
        success: false,
        message: message.to_string(),
      }),
    )
      .into_response();
  }

  let result = state
    .dispatcher
    .verify(&request.reference, request.expected_amount, &request.chain)
    .await;

  // Caller input must not mint new metric label values
  let chain_label = ChainId::parse(&request.chain)
    .map_or("unknown", |chain| chain.as_label());
  state.metrics.record_verification(chain_label, &result);

  info!(
    %request_id,
    chain = %request.chain,
    is_valid = result.is_valid,
    "Verification request served"
  );

  let status = if result.is_valid {
    StatusCode::OK
  } else {
    StatusCode::BAD_REQUEST
  };
  let message = if result.is_valid {
    "Payment verified successfully".to_string()
  } else {
    "Invalid transaction or payment not confirmed".to_string()
  };

  (
    status,
    Json(VerifyPaymentResponse {
      success: result.is_valid,
      message,
      request_id,
      data: result,
    }),
  )
    .into_response()
}

async fn transaction_status(
  State(state): State<ApiState>,
  Path((chain, reference)): Path<(String, String)>,
) -> Json<TransactionStatus> {
  Json(state.dispatcher.status(&reference, &chain).await)
}

async fn fee_snapshot(State(state): State<ApiState>) -> Json<FeeSnapshot> {
  let snapshot = state.fee_oracle.snapshot().await;
  state.metrics.record_snapshot(&snapshot);
  Json(snapshot)
}

async fn fee_info(State(state): State<ApiState>) -> Json<PlatformFeeInfo> {
  Json(state.fee_info.as_ref().clone())
}

async fn ready(State(state): State<ApiState>) -> StatusCode {
  if *state.ready.borrow() {
    StatusCode::OK
  } else {
    StatusCode::SERVICE_UNAVAILABLE
  }
}

async fn metrics(State(state): State<ApiState>) -> String {
  state.metrics.render()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn request(reference: &str, amount: Decimal, chain: &str) -> VerifyPaymentRequest {
    VerifyPaymentRequest {
      reference: reference.to_string(),
      expected_amount: amount,
      chain: chain.to_string(),
    }
  }

  #[test]
  fn test_empty_reference_rejected() {
    assert!(validate_request(&request("", dec!(1), "ethereum")).is_err());
    assert!(validate_request(&request("   ", dec!(1), "ethereum")).is_err());
  }

  #[test]
  fn test_negative_amount_rejected() {
    assert!(validate_request(&request("0xabc", dec!(-0.1), "ethereum")).is_err());
  }

  #[test]
  fn test_zero_amount_accepted() {
    // Zero threshold is how status polling reuses verification
    assert!(validate_request(&request("0xabc", Decimal::ZERO, "ethereum")).is_ok());
  }

  #[test]
  fn test_request_deserializes_from_json() {
    let json = r#"{"reference":"0xabc","expected_amount":"0.001","chain":"Polygon"}"#;
    let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.expected_amount, dec!(0.001));
    assert_eq!(request.chain, "Polygon");
  }
}
