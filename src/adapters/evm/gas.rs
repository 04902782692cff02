//! EVM Gas Source - Explorer Gas Oracle Queries
//!
//! Implements the `FeeSource` port for Ethereum and Polygon using the
//! explorer gastracker module. Each chain carries its own static
//! fallback tiers so that an unavailable oracle still yields a
//! best-effort estimate.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::domain::fees::FeeEstimate;
use crate::domain::verification::ChainId;
use crate::ports::fee_source::FeeSource;

use super::explorer::ExplorerClient;

/// Gas oracle fee source for one EVM chain.
pub struct EvmGasSource {
    /// Chain this source estimates for.
    chain: ChainId,
    /// Shared explorer client for this chain.
    client: Arc<ExplorerClient>,
}

impl EvmGasSource {
    /// Create a gas source for an EVM chain.
    pub fn new(chain: ChainId, client: Arc<ExplorerClient>) -> Result<Self> {
        anyhow::ensure!(
            chain.is_evm(),
            "EvmGasSource cannot serve non-EVM chain {chain}"
        );
        Ok(Self { chain, client })
    }
}

#[async_trait]
impl FeeSource for EvmGasSource {
    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn estimate(&self) -> Result<FeeEstimate> {
        let tiers = self.client.gas_oracle().await?;
        debug!(chain = %self.chain, safe = %tiers.safe_gas_price, "Gas oracle responded");
        Ok(FeeEstimate::Gas {
            safe: tiers.safe_gas_price,
            propose: tiers.propose_gas_price,
            fast: tiers.fast_gas_price,
        })
    }

    fn fallback(&self) -> FeeEstimate {
        // Static gwei tiers, distinct per chain: Polygon gas runs
        // structurally higher than mainnet.
        match self.chain {
            ChainId::Polygon => FeeEstimate::gas("30", "35", "40"),
            _ => FeeEstimate::gas("20", "25", "30"),
        }
    }
}
