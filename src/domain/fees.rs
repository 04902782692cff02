//! Fee estimate domain types.
//!
//! Fee values are opaque decimal strings passed through from the
//! upstream oracles: this layer never parses them as currency. What it
//! does own is provenance - every branch of a snapshot is tagged as
//! live or fallback so callers can tell a fresh quote from the static
//! substitute used when a provider is down.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::verification::ChainId;

/// A fee estimate for one chain.
///
/// EVM oracles report gas price tiers; Solana reports a flat
/// average/priority pair per signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeEstimate {
    /// Gas price tiers in gwei, as reported by an explorer gas oracle.
    Gas {
        safe: String,
        propose: String,
        fast: String,
    },
    /// Per-signature fees in SOL.
    PerSignature { average: String, priority: String },
}

impl FeeEstimate {
    /// Gas tier estimate from opaque gwei strings.
    pub fn gas(safe: &str, propose: &str, fast: &str) -> Self {
        Self::Gas {
            safe: safe.to_string(),
            propose: propose.to_string(),
            fast: fast.to_string(),
        }
    }

    /// Per-signature estimate from opaque SOL strings.
    pub fn per_signature(average: &str, priority: &str) -> Self {
        Self::PerSignature {
            average: average.to_string(),
            priority: priority.to_string(),
        }
    }
}

/// A fee estimate together with its provenance.
///
/// A `Fallback` is still a usable estimate; the tag exists so that
/// downstream consumers can surface staleness instead of silently
/// treating a hard-coded value as a live quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum FeeQuote {
    /// Fresh estimate from the chain's fee oracle.
    Live { estimate: FeeEstimate },
    /// Static substitute after a provider failure or timeout.
    Fallback { estimate: FeeEstimate },
}

impl FeeQuote {
    /// The estimate, regardless of provenance.
    pub const fn estimate(&self) -> &FeeEstimate {
        match self {
            Self::Live { estimate } | Self::Fallback { estimate } => estimate,
        }
    }

    /// Whether this quote substituted a static value.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Point-in-time fee view across every supported chain.
///
/// Every field is always populated: a branch that failed contributes
/// its fallback quote rather than a hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    pub ethereum: FeeQuote,
    pub polygon: FeeQuote,
    pub solana: FeeQuote,
    /// When the snapshot was assembled.
    pub taken_at: DateTime<Utc>,
}

impl FeeSnapshot {
    /// Quote for a specific chain.
    pub const fn quote(&self, chain: ChainId) -> &FeeQuote {
        match chain {
            ChainId::Ethereum => &self.ethereum,
            ChainId::Polygon => &self.polygon,
            ChainId::Solana => &self.solana,
        }
    }

    /// Number of branches that fell back to static values.
    pub fn fallback_count(&self) -> usize {
        usize::from(self.ethereum.is_fallback())
            + usize::from(self.polygon.is_fallback())
            + usize::from(self.solana.is_fallback())
    }
}
