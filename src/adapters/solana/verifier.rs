//! Solana Transaction Verifier - Balance-delta Payment Checks
//!
//! Implements the `ChainVerifier` port for Solana. Solana transactions
//! carry no single "to" field; the transfer to the admin wallet is
//! recovered from the pre/post balance arrays at the admin key's
//! position in the account list:
//! - admin key absent from the account list: the transaction does not
//!   involve us at all, reported as not found
//! - `meta.err` non-null: landed on-chain but failed, which is a
//!   distinct outcome from not found
//! - a present slot number is the confirmation signal

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::units;
use crate::domain::verification::{ChainId, VerificationResult};
use crate::ports::chain_verifier::ChainVerifier;

use super::rpc::SolanaRpcClient;
use super::types::TransactionRecord;

/// RPC-backed verifier for Solana.
pub struct SolanaVerifier {
    /// Shared RPC client.
    client: Arc<SolanaRpcClient>,
    /// Admin recipient key, compared exactly (base58 is case-sensitive).
    admin_address: String,
}

impl SolanaVerifier {
    /// Create a Solana verifier.
    pub fn new(client: Arc<SolanaRpcClient>, admin_address: &str) -> Self {
        Self {
            client,
            admin_address: admin_address.to_string(),
        }
    }

    /// Apply the balance-delta validation rules to a fetched record.
    fn validate(&self, record: &TransactionRecord, expected_amount: Decimal) -> VerificationResult {
        let Some(meta) = &record.meta else {
            return VerificationResult::provider_error("transaction metadata missing");
        };

        if meta.err.is_some() {
            return VerificationResult::execution_failed();
        }

        let keys = &record.transaction.message.account_keys;
        let Some(index) = keys.iter().position(|key| key == &self.admin_address) else {
            // Admin wallet not involved in this transaction
            return VerificationResult::not_found();
        };

        let (Some(pre), Some(post)) = (meta.pre_balances.get(index), meta.post_balances.get(index))
        else {
            return VerificationResult::provider_error(
                "balance arrays shorter than account list",
            );
        };

        let transferred = units::lamport_delta_to_sol(*pre, *post);
        let confirmed = record.slot.is_some();

        VerificationResult::from_transfer(
            transferred,
            Some(self.admin_address.clone()),
            true,
            expected_amount,
            confirmed,
        )
    }
}

#[async_trait]
impl ChainVerifier for SolanaVerifier {
    fn chain(&self) -> ChainId {
        ChainId::Solana
    }

    async fn fetch_and_validate(
        &self,
        reference: &str,
        expected_amount: Decimal,
    ) -> VerificationResult {
        match self.client.get_transaction(reference).await {
            Ok(Some(record)) => {
                debug!(slot = ?record.slot, "Transaction record fetched");
                self.validate(&record, expected_amount)
            }
            Ok(None) => VerificationResult::not_found(),
            Err(e) => {
                warn!(reference, error = %e, "RPC lookup failed");
                VerificationResult::provider_error(format!("{e:#}"))
            }
        }
    }
}
