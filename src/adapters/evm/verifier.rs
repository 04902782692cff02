//! EVM Transaction Verifier - Explorer-backed Payment Checks
//!
//! Implements the `ChainVerifier` port for Ethereum and Polygon.
//! Validation rules for the EVM account model:
//! - recipient must case-insensitively equal the admin wallet
//! - value (wei, converted exactly to the native unit) must cover the
//!   expected amount
//! - a present block number is the confirmation signal
//!
//! Every provider failure is contained here and reported as a
//! structured result; nothing escapes as an error or panic.

use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::units;
use crate::domain::verification::{ChainId, VerificationResult};
use crate::ports::chain_verifier::ChainVerifier;

use super::explorer::ExplorerClient;
use super::types::{EvmTransaction, parse_hex_quantity};

/// Explorer-backed verifier for one EVM chain.
pub struct EvmVerifier {
    /// Chain this instance serves (Ethereum or Polygon).
    chain: ChainId,
    /// Shared explorer client for this chain.
    client: Arc<ExplorerClient>,
    /// Admin recipient wallet; parsed once so comparison is
    /// checksum- and case-insensitive.
    admin_address: Address,
}

impl EvmVerifier {
    /// Create a verifier for an EVM chain.
    ///
    /// Fails fast on a malformed admin address rather than rejecting
    /// every payment at runtime.
    pub fn new(chain: ChainId, client: Arc<ExplorerClient>, admin_address: &str) -> Result<Self> {
        anyhow::ensure!(
            chain.is_evm(),
            "EvmVerifier cannot serve non-EVM chain {chain}"
        );

        let admin_address = admin_address
            .parse::<Address>()
            .with_context(|| format!("Invalid admin wallet address: {admin_address:?}"))?;

        Ok(Self {
            chain,
            client,
            admin_address,
        })
    }

    /// Apply the EVM validation rules to a fetched transaction.
    fn validate(&self, tx: &EvmTransaction, expected_amount: Decimal) -> VerificationResult {
        let Some(wei) = parse_hex_quantity(&tx.value) else {
            return VerificationResult::provider_error(format!(
                "malformed value field: {:?}",
                tx.value
            ));
        };

        let Some(transferred) = units::wei_to_native(wei) else {
            return VerificationResult::provider_error(format!("value out of range: {wei} wei"));
        };

        let recipient_matches = match tx.to.as_deref() {
            Some(to) => match to.parse::<Address>() {
                Ok(address) => address == self.admin_address,
                Err(_) => {
                    return VerificationResult::provider_error(format!(
                        "malformed recipient address: {to:?}"
                    ));
                }
            },
            // Contract creation carries no recipient; never a payment to us.
            None => false,
        };

        let confirmed = tx.block_number.is_some();

        VerificationResult::from_transfer(
            transferred,
            tx.to.clone(),
            recipient_matches,
            expected_amount,
            confirmed,
        )
    }
}

#[async_trait]
impl ChainVerifier for EvmVerifier {
    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn fetch_and_validate(
        &self,
        reference: &str,
        expected_amount: Decimal,
    ) -> VerificationResult {
        match self.client.transaction_by_hash(reference).await {
            Ok(Some(tx)) => {
                debug!(chain = %self.chain, hash = %tx.hash, "Transaction record fetched");
                self.validate(&tx, expected_amount)
            }
            Ok(None) => VerificationResult::not_found(),
            Err(e) => {
                warn!(chain = %self.chain, reference, error = %e, "Explorer lookup failed");
                VerificationResult::provider_error(format!("{e:#}"))
            }
        }
    }
}
