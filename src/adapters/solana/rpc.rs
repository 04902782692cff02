//! Solana JSON-RPC Client - HTTP POST Transport
//!
//! Minimal JSON-RPC 2.0 client over reqwest for the two methods this
//! service consumes. Request timeouts are bounded at the HTTP client
//! level; RPC-level errors are lifted into `anyhow` errors so that
//! callers see one failure channel.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::types::{RpcEnvelope, TransactionRecord};

/// JSON-RPC client for one Solana endpoint.
pub struct SolanaRpcClient {
    /// Underlying HTTP client with a bounded timeout.
    http: Client,
    /// JSON-RPC HTTP endpoint.
    rpc_url: String,
}

impl SolanaRpcClient {
    /// Create a new RPC client.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Issue one JSON-RPC call and unwrap the envelope.
    ///
    /// Returns `Ok(None)` when the node answers with a null result
    /// (e.g. an unknown transaction signature).
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("RPC request {method} failed"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "RPC node returned HTTP {status}");

        let envelope: RpcEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("Malformed RPC response for {method}"))?;

        if let Some(error) = envelope.error {
            anyhow::bail!("RPC error {}: {}", error.code, error.message);
        }

        Ok(envelope.result)
    }

    /// Fetch one transaction by signature.
    ///
    /// The explicit encoding and transaction-version ceiling keep newer
    /// (versioned) transaction formats parseable.
    pub async fn get_transaction(&self, signature: &str) -> Result<Option<TransactionRecord>> {
        let record = self
            .call(
                "getTransaction",
                json!([signature, {"encoding": "json", "maxSupportedTransactionVersion": 0}]),
            )
            .await?;

        debug!(
            signature,
            found = matches!(record, Some(_)),
            "Transaction lookup complete"
        );
        Ok(record)
    }

    /// Probe the node with a recent performance sample request.
    ///
    /// Used by the fee source as a liveness check; the sample content
    /// itself is not interpreted.
    pub async fn recent_performance_samples(&self, limit: u32) -> Result<()> {
        let samples: Option<serde_json::Value> = self
            .call("getRecentPerformanceSamples", json!([limit]))
            .await?;

        anyhow::ensure!(samples.is_some(), "RPC node returned no performance samples");
        Ok(())
    }
}
