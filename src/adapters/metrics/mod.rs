//! Prometheus Metrics Registry - Verification Observability
//!
//! Registers and renders Prometheus metrics for verification outcomes
//! and fee oracle health. Counters are recorded at the HTTP boundary
//! so the core use cases stay free of observability concerns.

use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::domain::fees::FeeSnapshot;
use crate::domain::verification::{VerificationResult, VerifyFailure};

/// Centralized Prometheus metrics for the verifier.
///
/// All metrics follow the naming convention `chainpay_*` and include
/// chain labels for per-chain filtering.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Verification calls by chain and outcome.
    pub verifications_total: IntCounterVec,
    /// Fee snapshots assembled.
    pub fee_snapshots_total: IntCounter,
    /// Fee branches that substituted their static fallback, by chain.
    pub fee_fallbacks_total: IntCounterVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let verifications_total = IntCounterVec::new(
            Opts::new(
                "chainpay_verifications_total",
                "Payment verification calls by chain and outcome",
            ),
            &["chain", "outcome"],
        )?;

        let fee_snapshots_total = IntCounter::new(
            "chainpay_fee_snapshots_total",
            "Fee snapshots assembled",
        )?;

        let fee_fallbacks_total = IntCounterVec::new(
            Opts::new(
                "chainpay_fee_fallbacks_total",
                "Fee branches that fell back to static values",
            ),
            &["chain"],
        )?;

        registry.register(Box::new(verifications_total.clone()))?;
        registry.register(Box::new(fee_snapshots_total.clone()))?;
        registry.register(Box::new(fee_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            verifications_total,
            fee_snapshots_total,
            fee_fallbacks_total,
        })
    }

    /// Record one verification outcome.
    pub fn record_verification(&self, chain: &str, result: &VerificationResult) {
        self.verifications_total
            .with_label_values(&[chain, outcome_label(result)])
            .inc();
    }

    /// Record one assembled fee snapshot.
    pub fn record_snapshot(&self, snapshot: &FeeSnapshot) {
        self.fee_snapshots_total.inc();
        for (chain, quote) in [
            ("ethereum", &snapshot.ethereum),
            ("polygon", &snapshot.polygon),
            ("solana", &snapshot.solana),
        ] {
            if quote.is_fallback() {
                self.fee_fallbacks_total.with_label_values(&[chain]).inc();
            }
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Stable outcome label for a verification result.
fn outcome_label(result: &VerificationResult) -> &'static str {
    match &result.failure {
        None if result.is_valid => "valid",
        None => "invalid",
        Some(VerifyFailure::NotFound) => "not_found",
        Some(VerifyFailure::ExecutionFailed) => "execution_failed",
        Some(VerifyFailure::UnsupportedChain { .. }) => "unsupported_chain",
        Some(VerifyFailure::Provider { .. }) => "provider_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fees::{FeeEstimate, FeeQuote};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_labels() {
        let valid = VerificationResult::from_transfer(
            dec!(1),
            Some("0xadmin".into()),
            true,
            dec!(1),
            true,
        );
        assert_eq!(outcome_label(&valid), "valid");

        let short = VerificationResult::from_transfer(
            dec!(0.1),
            Some("0xadmin".into()),
            true,
            dec!(1),
            true,
        );
        assert_eq!(outcome_label(&short), "invalid");

        assert_eq!(outcome_label(&VerificationResult::not_found()), "not_found");
        assert_eq!(
            outcome_label(&VerificationResult::provider_error("x")),
            "provider_error"
        );
    }

    #[test]
    fn test_render_contains_recorded_counters() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.record_verification("ethereum", &VerificationResult::not_found());

        let snapshot = FeeSnapshot {
            ethereum: FeeQuote::Fallback {
                estimate: FeeEstimate::gas("20", "25", "30"),
            },
            polygon: FeeQuote::Live {
                estimate: FeeEstimate::gas("30", "35", "40"),
            },
            solana: FeeQuote::Live {
                estimate: FeeEstimate::per_signature("0.000005", "0.00001"),
            },
            taken_at: Utc::now(),
        };
        metrics.record_snapshot(&snapshot);

        let rendered = metrics.render();
        assert!(rendered.contains("chainpay_verifications_total"));
        assert!(rendered.contains("chainpay_fee_snapshots_total"));
        assert!(rendered.contains(r#"chain="ethereum""#));
    }
}
