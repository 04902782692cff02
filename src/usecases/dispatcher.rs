//! Verification Dispatcher - Chain-agnostic Entry Point
//!
//! Resolves a caller-supplied chain name to the matching verifier and
//! forwards the request. The chain set is a closed enum, so the
//! adapter match is exhaustive at compile time; unknown names short
//! out before any network call with a terminal `UnsupportedChain`.
//!
//! The adapters already absorb every provider failure into a
//! structured result, so the dispatcher's only added containment is
//! its total signature: there is no code path that returns anything
//! but a `VerificationResult`.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::verification::{
  ChainId, ConfirmationState, VerificationRequest, VerificationResult, VerifyFailure,
};
use crate::ports::chain_verifier::ChainVerifier;

/// Flattened status view for polling callers.
///
/// `confirmed` reports whether the transfer is already usable as a
/// payment signal (recipient matched and landed on-chain), not merely
/// whether a record exists.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionStatus {
  /// Transaction reference as supplied by the caller.
  pub reference: String,
  /// Normalized chain name.
  pub chain: String,
  /// Confirmation state of the referenced transaction.
  pub state: ConfirmationState,
  /// Whether the transfer verified against a zero threshold.
  pub confirmed: bool,
  /// Observed transfer amount, when a record was interpreted.
  pub amount: Option<Decimal>,
  /// Failure classification, when verification could not complete.
  pub error: Option<VerifyFailure>,
}

/// Chain-agnostic verification front door.
///
/// One verifier per supported chain, selected by enum dispatch. All
/// state is read-only after construction; concurrent calls share
/// nothing mutable.
pub struct VerificationDispatcher {
  ethereum: Arc<dyn ChainVerifier>,
  polygon: Arc<dyn ChainVerifier>,
  solana: Arc<dyn ChainVerifier>,
}

impl VerificationDispatcher {
  /// Create a dispatcher over one verifier per chain.
  pub fn new(
    ethereum: Arc<dyn ChainVerifier>,
    polygon: Arc<dyn ChainVerifier>,
    solana: Arc<dyn ChainVerifier>,
  ) -> Self {
    Self {
      ethereum,
      polygon,
      solana,
    }
  }

  fn verifier_for(&self, chain: ChainId) -> &dyn ChainVerifier {
    match chain {
      ChainId::Ethereum => self.ethereum.as_ref(),
      ChainId::Polygon => self.polygon.as_ref(),
      ChainId::Solana => self.solana.as_ref(),
    }
  }

  /// Verify that `reference` transferred at least `expected_amount`
  /// (native units) to the configured admin wallet on the named chain.
  ///
  /// Chain-name matching is case-insensitive. This function never
  /// errors; every failure is a structured result.
  pub async fn verify(
    &self,
    reference: &str,
    expected_amount: Decimal,
    chain_name: &str,
  ) -> VerificationResult {
    let Some(chain) = ChainId::parse(chain_name) else {
      debug!(chain = chain_name, "Rejecting unsupported chain");
      return VerificationResult::unsupported_chain(chain_name);
    };

    let result = self
      .verifier_for(chain)
      .fetch_and_validate(reference, expected_amount)
      .await;

    info!(
      chain = %chain,
      reference,
      is_valid = result.is_valid,
      state = ?result.confirmation,
      failure = ?result.failure,
      "Verification complete"
    );

    result
  }

  /// Verify a typed request whose chain is already resolved.
  ///
  /// Skips name parsing; used by callers that carry a `ChainId`
  /// instead of a raw chain name.
  pub async fn verify_request(&self, request: &VerificationRequest) -> VerificationResult {
    self
      .verifier_for(request.chain)
      .fetch_and_validate(&request.reference, request.expected_amount)
      .await
  }

  /// Report the current on-chain state of `reference` without an
  /// amount threshold.
  ///
  /// Reuses `verify` with a zero expected amount: any non-negative
  /// transfer to the admin wallet passes the threshold, so the result
  /// reflects pure chain state. Intentionally the same code path.
  pub async fn status(&self, reference: &str, chain_name: &str) -> TransactionStatus {
    let result = self.verify(reference, Decimal::ZERO, chain_name).await;

    TransactionStatus {
      reference: reference.to_string(),
      chain: chain_name.trim().to_ascii_lowercase(),
      state: result.confirmation,
      confirmed: result.is_valid,
      amount: result.transferred_amount,
      error: result.failure,
    }
  }
}
