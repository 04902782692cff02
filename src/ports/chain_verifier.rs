//! Chain Verifier Port - Transaction Lookup Interface
//!
//! Defines the trait each chain family implements to fetch one
//! transaction record from its data provider and normalize it into a
//! chain-agnostic verification result.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::verification::{ChainId, VerificationResult};

/// Trait for chain-specific payment verification.
///
/// Implementations own the provider protocol (explorer HTTP API,
/// JSON-RPC) and the chain's validation rules. Every failure path is
/// absorbed into the returned result - the method itself never errors
/// and never panics, so the dispatcher's contract of "always a
/// structured result" holds by construction.
#[async_trait]
pub trait ChainVerifier: Send + Sync + 'static {
  /// Chain this verifier serves.
  fn chain(&self) -> ChainId;

  /// Fetch the referenced transaction and validate the transfer
  /// against the expected amount (in the chain's native unit).
  ///
  /// Verification is idempotent for finalized chain state; only the
  /// pending-to-confirmed transition may change the result between
  /// calls.
  async fn fetch_and_validate(
    &self,
    reference: &str,
    expected_amount: Decimal,
  ) -> VerificationResult;
}
