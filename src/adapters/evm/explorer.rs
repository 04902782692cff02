//! Explorer HTTP Client - Etherscan-style API Access
//!
//! Wraps reqwest for the two explorer modules this service consumes:
//! transaction lookup (`proxy`) and gas estimation (`gastracker`).
//! One client instance per EVM chain, sharing a connection pool and a
//! bounded per-request timeout.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::types::{EvmTransaction, GasOracleEnvelope, GasOracleTiers, ProxyEnvelope};

/// HTTP client for one etherscan-style explorer endpoint.
pub struct ExplorerClient {
    /// Underlying HTTP client with a bounded timeout.
    http: Client,
    /// Explorer API base URL.
    base_url: String,
    /// Explorer API key.
    api_key: String,
}

impl ExplorerClient {
    /// Create a new explorer client.
    ///
    /// The timeout applies to every request issued through this
    /// client; a timed-out call surfaces as an ordinary error.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch one transaction by hash via the proxy module.
    ///
    /// Returns `Ok(None)` when the explorer knows no such transaction.
    pub async fn transaction_by_hash(&self, tx_hash: &str) -> Result<Option<EvmTransaction>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("module", "proxy"),
                ("action", "eth_getTransactionByHash"),
                ("txhash", tx_hash),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Explorer request failed")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "Explorer returned HTTP {status}");

        let envelope: ProxyEnvelope = response
            .json()
            .await
            .context("Malformed explorer response")?;

        debug!(
            tx_hash,
            found = envelope.result.is_some(),
            "Transaction lookup complete"
        );
        Ok(envelope.result)
    }

    /// Fetch current gas price tiers via the gastracker module.
    pub async fn gas_oracle(&self) -> Result<GasOracleTiers> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Gas oracle request failed")?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "Gas oracle returned HTTP {status}");

        let envelope: GasOracleEnvelope = response
            .json()
            .await
            .context("Malformed gas oracle response")?;

        anyhow::ensure!(
            envelope.status == "1",
            "Gas oracle rejected request: {}",
            envelope.message
        );

        serde_json::from_value(envelope.result).context("Malformed gas oracle tiers")
    }
}
