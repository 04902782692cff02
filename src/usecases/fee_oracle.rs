//! Fee Oracle - Concurrent Multi-chain Fee Aggregation
//!
//! Fans out one fee-estimate request per supported chain with
//! all-settled join semantics: every branch runs to completion
//! (success, error or timeout) and the snapshot is assembled from
//! whatever came back. The join itself cannot fail - a branch that
//! errors or times out contributes its chain's static fallback,
//! tagged as such.
//!
//! The three branches run concurrently with independent timeouts, so
//! one slow provider delays the snapshot by at most the branch
//! timeout and never affects the other two.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::fees::{FeeQuote, FeeSnapshot};
use crate::ports::fee_source::FeeSource;

/// Aggregates per-chain fee sources into point-in-time snapshots.
pub struct FeeOracle {
  ethereum: Arc<dyn FeeSource>,
  polygon: Arc<dyn FeeSource>,
  solana: Arc<dyn FeeSource>,
  /// Upper bound for each branch, applied independently.
  branch_timeout: Duration,
}

impl FeeOracle {
  /// Create an oracle over one fee source per chain.
  pub fn new(
    ethereum: Arc<dyn FeeSource>,
    polygon: Arc<dyn FeeSource>,
    solana: Arc<dyn FeeSource>,
    branch_timeout: Duration,
  ) -> Self {
    Self {
      ethereum,
      polygon,
      solana,
      branch_timeout,
    }
  }

  /// Assemble a fee snapshot across all supported chains.
  ///
  /// Always returns a fully populated snapshot; fee display is
  /// best-effort and must never block payment verification.
  pub async fn snapshot(&self) -> FeeSnapshot {
    let (ethereum, polygon, solana) = tokio::join!(
      self.branch(self.ethereum.as_ref()),
      self.branch(self.polygon.as_ref()),
      self.branch(self.solana.as_ref()),
    );

    let snapshot = FeeSnapshot {
      ethereum,
      polygon,
      solana,
      taken_at: Utc::now(),
    };

    debug!(
      fallbacks = snapshot.fallback_count(),
      "Fee snapshot assembled"
    );
    snapshot
  }

  /// Run one source with its own timeout, absorbing failure into the
  /// chain's static fallback.
  async fn branch(&self, source: &dyn FeeSource) -> FeeQuote {
    match tokio::time::timeout(self.branch_timeout, source.estimate()).await {
      Ok(Ok(estimate)) => FeeQuote::Live { estimate },
      Ok(Err(e)) => {
        warn!(chain = %source.chain(), error = %e, "Fee source failed, using fallback");
        FeeQuote::Fallback {
          estimate: source.fallback(),
        }
      }
      Err(_) => {
        warn!(
          chain = %source.chain(),
          timeout_ms = self.branch_timeout.as_millis(),
          "Fee source timed out, using fallback"
        );
        FeeQuote::Fallback {
          estimate: source.fallback(),
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::fees::FeeEstimate;
  use crate::domain::verification::ChainId;
  use async_trait::async_trait;

  /// Test double with configurable behavior per call.
  struct StubSource {
    chain: ChainId,
    live: Option<FeeEstimate>,
    delay: Option<Duration>,
  }

  impl StubSource {
    fn live(chain: ChainId, estimate: FeeEstimate) -> Arc<Self> {
      Arc::new(Self {
        chain,
        live: Some(estimate),
        delay: None,
      })
    }

    fn failing(chain: ChainId) -> Arc<Self> {
      Arc::new(Self {
        chain,
        live: None,
        delay: None,
      })
    }

    fn slow(chain: ChainId, delay: Duration) -> Arc<Self> {
      Arc::new(Self {
        chain,
        live: Some(FeeEstimate::gas("1", "2", "3")),
        delay: Some(delay),
      })
    }
  }

  #[async_trait]
  impl FeeSource for StubSource {
    fn chain(&self) -> ChainId {
      self.chain
    }

    async fn estimate(&self) -> anyhow::Result<FeeEstimate> {
      if let Some(delay) = self.delay {
        tokio::time::sleep(delay).await;
      }
      self
        .live
        .clone()
        .ok_or_else(|| anyhow::anyhow!("provider unavailable"))
    }

    fn fallback(&self) -> FeeEstimate {
      match self.chain {
        ChainId::Ethereum => FeeEstimate::gas("20", "25", "30"),
        ChainId::Polygon => FeeEstimate::gas("30", "35", "40"),
        ChainId::Solana => FeeEstimate::per_signature("0.000005", "0.00001"),
      }
    }
  }

  fn oracle(
    ethereum: Arc<StubSource>,
    polygon: Arc<StubSource>,
    solana: Arc<StubSource>,
    timeout: Duration,
  ) -> FeeOracle {
    FeeOracle::new(ethereum, polygon, solana, timeout)
  }

  #[tokio::test]
  async fn test_all_live_sources() {
    let oracle = oracle(
      StubSource::live(ChainId::Ethereum, FeeEstimate::gas("18", "22", "28")),
      StubSource::live(ChainId::Polygon, FeeEstimate::gas("31", "36", "44")),
      StubSource::live(
        ChainId::Solana,
        FeeEstimate::per_signature("0.000005", "0.00001"),
      ),
      Duration::from_secs(1),
    );

    let snapshot = oracle.snapshot().await;
    assert_eq!(snapshot.fallback_count(), 0);
    assert_eq!(
      snapshot.ethereum.estimate(),
      &FeeEstimate::gas("18", "22", "28")
    );
  }

  #[tokio::test]
  async fn test_single_failure_does_not_affect_others() {
    let oracle = oracle(
      StubSource::failing(ChainId::Ethereum),
      StubSource::live(ChainId::Polygon, FeeEstimate::gas("31", "36", "44")),
      StubSource::live(
        ChainId::Solana,
        FeeEstimate::per_signature("0.000005", "0.00001"),
      ),
      Duration::from_secs(1),
    );

    let snapshot = oracle.snapshot().await;
    assert!(snapshot.ethereum.is_fallback());
    assert!(!snapshot.polygon.is_fallback());
    assert!(!snapshot.solana.is_fallback());
    // Failed branch still contributes its static estimate
    assert_eq!(
      snapshot.ethereum.estimate(),
      &FeeEstimate::gas("20", "25", "30")
    );
  }

  #[tokio::test]
  async fn test_total_failure_still_yields_full_snapshot() {
    let oracle = oracle(
      StubSource::failing(ChainId::Ethereum),
      StubSource::failing(ChainId::Polygon),
      StubSource::failing(ChainId::Solana),
      Duration::from_secs(1),
    );

    let snapshot = oracle.snapshot().await;
    assert_eq!(snapshot.fallback_count(), 3);
    assert_eq!(
      snapshot.polygon.estimate(),
      &FeeEstimate::gas("30", "35", "40")
    );
    assert_eq!(
      snapshot.solana.estimate(),
      &FeeEstimate::per_signature("0.000005", "0.00001")
    );
  }

  #[tokio::test(start_paused = true)]
  async fn test_timeout_becomes_fallback() {
    let oracle = oracle(
      StubSource::slow(ChainId::Ethereum, Duration::from_secs(30)),
      StubSource::live(ChainId::Polygon, FeeEstimate::gas("31", "36", "44")),
      StubSource::live(
        ChainId::Solana,
        FeeEstimate::per_signature("0.000005", "0.00001"),
      ),
      Duration::from_secs(5),
    );

    let snapshot = oracle.snapshot().await;
    assert!(snapshot.ethereum.is_fallback());
    assert!(!snapshot.polygon.is_fallback());
  }

  #[tokio::test(start_paused = true)]
  async fn test_branches_run_concurrently() {
    // Three sources that each take 4s with a 5s budget: concurrent
    // execution finishes inside one budget, sequential would not.
    let oracle = oracle(
      StubSource::slow(ChainId::Ethereum, Duration::from_secs(4)),
      StubSource::slow(ChainId::Polygon, Duration::from_secs(4)),
      StubSource::slow(ChainId::Solana, Duration::from_secs(4)),
      Duration::from_secs(5),
    );

    let started = tokio::time::Instant::now();
    let snapshot = oracle.snapshot().await;
    let elapsed = started.elapsed();

    assert_eq!(snapshot.fallback_count(), 0);
    assert!(elapsed < Duration::from_secs(5), "branches ran sequentially: {elapsed:?}");
  }
}
