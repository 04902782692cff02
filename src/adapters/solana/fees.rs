//! Solana Fee Source - Static Rates Behind a Liveness Probe
//!
//! Solana transaction fees are flat per signature, so the reported
//! estimate is a static average/priority pair rather than a market
//! reading. The RPC probe still runs on every estimate: a dead or
//! unreachable node demotes the pair from a live quote to a fallback,
//! which the aggregator surfaces to callers.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domain::fees::FeeEstimate;
use crate::domain::verification::ChainId;
use crate::ports::fee_source::FeeSource;

use super::rpc::SolanaRpcClient;

/// Flat per-signature fee in SOL.
const AVERAGE_FEE_SOL: &str = "0.000005";
/// Typical priority fee in SOL.
const PRIORITY_FEE_SOL: &str = "0.00001";

/// Probe-backed fee source for Solana.
pub struct SolanaFeeSource {
    /// Shared RPC client.
    client: Arc<SolanaRpcClient>,
}

impl SolanaFeeSource {
    /// Create a Solana fee source.
    pub const fn new(client: Arc<SolanaRpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeeSource for SolanaFeeSource {
    fn chain(&self) -> ChainId {
        ChainId::Solana
    }

    async fn estimate(&self) -> Result<FeeEstimate> {
        self.client
            .recent_performance_samples(1)
            .await
            .context("RPC liveness probe failed")?;

        Ok(FeeEstimate::per_signature(AVERAGE_FEE_SOL, PRIORITY_FEE_SOL))
    }

    fn fallback(&self) -> FeeEstimate {
        FeeEstimate::per_signature(AVERAGE_FEE_SOL, PRIORITY_FEE_SOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_estimate_when_node_alive() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                r#"{"jsonrpc":"2.0","id":1,"result":[
                    {"numSlots": 126, "numTransactions": 126, "samplePeriodSecs": 60, "slot": 348125}
                ]}"#,
            )
            .create_async()
            .await;

        let client =
            Arc::new(SolanaRpcClient::new(&server.url(), Duration::from_secs(2)).unwrap());
        let source = SolanaFeeSource::new(client);

        let estimate = source.estimate().await.unwrap();
        assert_eq!(
            estimate,
            FeeEstimate::per_signature("0.000005", "0.00001")
        );
    }

    #[tokio::test]
    async fn test_estimate_fails_when_node_dead() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let client =
            Arc::new(SolanaRpcClient::new(&server.url(), Duration::from_secs(2)).unwrap());
        let source = SolanaFeeSource::new(client);

        assert!(source.estimate().await.is_err());
        // The fallback mirrors the live pair for this chain
        assert_eq!(source.fallback(), FeeEstimate::per_signature("0.000005", "0.00001"));
    }
}
