//! Core verification domain types.
//!
//! Defines the chain identifiers, request/result shapes and the closed
//! failure taxonomy shared by every chain adapter. All entities here are
//! request-scoped values: created per call, never mutated after
//! construction, discarded once the caller consumes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chains the verification engine can dispatch to.
///
/// A closed enum rather than a string switch: adding a chain is a
/// compile-time-checked extension of every `match` in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Ethereum,
    Polygon,
    Solana,
}

impl ChainId {
    /// Parse a caller-supplied chain name, case-insensitively.
    ///
    /// Anything outside the supported set (including the empty string)
    /// yields `None`; callers map that to an `UnsupportedChain` failure
    /// without touching the network.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ethereum" => Some(Self::Ethereum),
            "polygon" => Some(Self::Polygon),
            "solana" => Some(Self::Solana),
            _ => None,
        }
    }

    /// Native currency symbol for this chain.
    pub const fn native_currency(self) -> &'static str {
        match self {
            Self::Ethereum => "ETH",
            Self::Polygon => "MATIC",
            Self::Solana => "SOL",
        }
    }

    /// Whether this chain follows the EVM account/transaction model.
    pub const fn is_evm(self) -> bool {
        matches!(self, Self::Ethereum | Self::Polygon)
    }

    /// Lowercase static name, suitable for metric labels.
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Polygon => "polygon",
            Self::Solana => "solana",
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Whether the referenced transaction is part of canonical chain history.
///
/// `Confirmed` means the provider reported a block/slot number for the
/// transaction. `Unknown` covers every path where no on-chain state was
/// observed (not found, unsupported chain, provider failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationState {
    Pending,
    Confirmed,
    Unknown,
}

/// Closed failure taxonomy for verification outcomes.
///
/// `Provider` is the only transient kind: callers may retry it. The
/// rest are terminal for the given input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifyFailure {
    /// No matching record on-chain (or the configured recipient was not
    /// involved in the transaction at all, for balance-delta chains).
    #[error("transaction not found")]
    NotFound,

    /// The transaction landed on-chain but its execution failed.
    #[error("transaction failed on-chain")]
    ExecutionFailed,

    /// The requested chain is not one we verify. Caller bug, never
    /// retryable.
    #[error("unsupported blockchain: {chain:?}")]
    UnsupportedChain { chain: String },

    /// Network/timeout/malformed-response failure from the upstream
    /// provider. Transient; safe for the caller to retry.
    #[error("provider error: {detail}")]
    Provider { detail: String },
}

impl VerifyFailure {
    /// Whether the caller can reasonably retry the same request.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

/// A single payment verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Chain-specific transaction identifier (hex hash for EVM chains,
    /// base58 signature for Solana).
    pub reference: String,
    /// Minimum transfer value, in the chain's native unit (ETH/MATIC/SOL).
    pub expected_amount: Decimal,
    /// Chain to verify against.
    pub chain: ChainId,
}

/// Outcome of verifying one on-chain transfer.
///
/// Invariant: `is_valid` holds only when the recipient matched the
/// configured admin address, the transferred amount covers the expected
/// amount, and the transaction is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the transfer satisfies every validity condition.
    pub is_valid: bool,
    /// Observed transfer value in the chain's native unit, when a
    /// record was found and parsed.
    pub transferred_amount: Option<Decimal>,
    /// Recipient address observed on-chain, when known.
    pub recipient: Option<String>,
    /// Confirmation state of the referenced transaction.
    pub confirmation: ConfirmationState,
    /// Failure classification; `None` when a record was found and
    /// interpreted (even if it did not validate).
    pub failure: Option<VerifyFailure>,
}

impl VerificationResult {
    /// Build a result from an observed transfer.
    ///
    /// `recipient_matches` must already account for the chain's address
    /// comparison rules (case-insensitive for EVM, exact for Solana).
    pub fn from_transfer(
        transferred: Decimal,
        recipient: Option<String>,
        recipient_matches: bool,
        expected: Decimal,
        confirmed: bool,
    ) -> Self {
        Self {
            is_valid: recipient_matches && transferred >= expected && confirmed,
            transferred_amount: Some(transferred),
            recipient,
            confirmation: if confirmed {
                ConfirmationState::Confirmed
            } else {
                ConfirmationState::Pending
            },
            failure: None,
        }
    }

    /// No matching on-chain record.
    pub const fn not_found() -> Self {
        Self::failed(VerifyFailure::NotFound)
    }

    /// Transaction present on-chain but errored during execution.
    pub const fn execution_failed() -> Self {
        Self::failed(VerifyFailure::ExecutionFailed)
    }

    /// Requested chain is outside the supported set.
    pub fn unsupported_chain(name: &str) -> Self {
        Self::failed(VerifyFailure::UnsupportedChain {
            chain: name.to_string(),
        })
    }

    /// Upstream provider failed (transport, timeout, malformed payload).
    pub fn provider_error(detail: impl Into<String>) -> Self {
        Self::failed(VerifyFailure::Provider {
            detail: detail.into(),
        })
    }

    const fn failed(failure: VerifyFailure) -> Self {
        Self {
            is_valid: false,
            transferred_amount: None,
            recipient: None,
            confirmation: ConfirmationState::Unknown,
            failure: Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chain_parse_case_insensitive() {
        assert_eq!(ChainId::parse("Ethereum"), Some(ChainId::Ethereum));
        assert_eq!(ChainId::parse("POLYGON"), Some(ChainId::Polygon));
        assert_eq!(ChainId::parse("  solana "), Some(ChainId::Solana));
    }

    #[test]
    fn test_chain_parse_rejects_unknown() {
        assert_eq!(ChainId::parse("dogecoin"), None);
        assert_eq!(ChainId::parse(""), None);
        assert_eq!(ChainId::parse("ether"), None);
    }

    #[test]
    fn test_chain_metadata() {
        assert_eq!(ChainId::Ethereum.native_currency(), "ETH");
        assert_eq!(ChainId::Polygon.native_currency(), "MATIC");
        assert_eq!(ChainId::Solana.native_currency(), "SOL");
        assert!(ChainId::Polygon.is_evm());
        assert!(!ChainId::Solana.is_evm());
        assert_eq!(ChainId::Solana.to_string(), "solana");
    }

    #[test]
    fn test_valid_transfer_requires_all_conditions() {
        // recipient mismatch alone invalidates
        let r = VerificationResult::from_transfer(dec!(1), None, false, dec!(0.5), true);
        assert!(!r.is_valid);

        // insufficient amount alone invalidates
        let r = VerificationResult::from_transfer(
            dec!(0.4),
            Some("0xabc".into()),
            true,
            dec!(0.5),
            true,
        );
        assert!(!r.is_valid);

        // missing confirmation alone invalidates
        let r = VerificationResult::from_transfer(
            dec!(1),
            Some("0xabc".into()),
            true,
            dec!(0.5),
            false,
        );
        assert!(!r.is_valid);
        assert_eq!(r.confirmation, ConfirmationState::Pending);

        // all three together validate
        let r = VerificationResult::from_transfer(
            dec!(1),
            Some("0xabc".into()),
            true,
            dec!(0.5),
            true,
        );
        assert!(r.is_valid);
        assert_eq!(r.confirmation, ConfirmationState::Confirmed);
    }

    #[test]
    fn test_exact_threshold_is_valid() {
        let r = VerificationResult::from_transfer(
            dec!(0.005),
            Some("0xabc".into()),
            true,
            dec!(0.005),
            true,
        );
        assert!(r.is_valid);
    }

    #[test]
    fn test_failure_constructors_carry_no_amount() {
        for r in [
            VerificationResult::not_found(),
            VerificationResult::execution_failed(),
            VerificationResult::unsupported_chain("dogecoin"),
            VerificationResult::provider_error("connection reset"),
        ] {
            assert!(!r.is_valid);
            assert_eq!(r.transferred_amount, None);
            assert_eq!(r.recipient, None);
            assert_eq!(r.confirmation, ConfirmationState::Unknown);
            assert!(r.failure.is_some());
        }
    }

    #[test]
    fn test_only_provider_failures_are_retryable() {
        assert!(
            VerifyFailure::Provider {
                detail: "timeout".into()
            }
            .is_retryable()
        );
        assert!(!VerifyFailure::NotFound.is_retryable());
        assert!(!VerifyFailure::ExecutionFailed.is_retryable());
        assert!(
            !VerifyFailure::UnsupportedChain {
                chain: "ripple".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_failure_serializes_with_kind_tag() {
        let json = serde_json::to_value(VerifyFailure::Provider {
            detail: "503".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "provider");
        assert_eq!(json["detail"], "503");
    }
}
