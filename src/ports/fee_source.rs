//! Fee Source Port - Per-chain Fee Estimation Interface
//!
//! Each supported chain contributes one fee source to the aggregator.
//! A source may fail (network, timeout, malformed payload); its static
//! fallback keeps the aggregated snapshot fully populated.

use async_trait::async_trait;

use crate::domain::fees::FeeEstimate;
use crate::domain::verification::ChainId;

/// Trait for chain fee/gas oracles.
#[async_trait]
pub trait FeeSource: Send + Sync + 'static {
  /// Chain this source estimates fees for.
  fn chain(&self) -> ChainId;

  /// Query the upstream oracle for a current estimate.
  async fn estimate(&self) -> anyhow::Result<FeeEstimate>;

  /// Static estimate substituted when the upstream call fails or
  /// times out. Infallible and instant.
  fn fallback(&self) -> FeeEstimate;
}
