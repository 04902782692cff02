//! Configuration Module - TOML-based Verifier Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides for secrets (API keys, admin wallet
//! addresses). All provider endpoints and the admin recipient are
//! externalized here - nothing is hardcoded in the domain layer.
//! Configuration is read once at startup and never mutated.

pub mod loader;

use serde::{Deserialize, Serialize};

/// Top-level verifier configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the service begins accepting requests.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and HTTP binding.
  #[serde(default)]
  pub service: ServiceConfig,
  /// Admin recipient wallet addresses (EVM and Solana forms).
  pub admin: AdminWalletConfig,
  /// Ethereum explorer API endpoint.
  #[serde(default = "default_ethereum_explorer")]
  pub ethereum: ExplorerApiConfig,
  /// Polygon explorer API endpoint.
  #[serde(default = "default_polygon_explorer")]
  pub polygon: ExplorerApiConfig,
  /// Solana JSON-RPC endpoint.
  #[serde(default)]
  pub solana: SolanaRpcConfig,
  /// Outbound request timeouts.
  #[serde(default)]
  pub timeouts: TimeoutConfig,
  /// Platform posting prices shown to payers.
  #[serde(default)]
  pub platform_fees: PlatformFeeConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  #[serde(default = "default_service_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// HTTP API bind address.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      log_level: default_log_level(),
      bind_address: default_bind_address(),
    }
  }
}

/// Admin recipient wallet addresses.
///
/// Payments are only valid when sent to these addresses. The EVM form
/// is compared case-insensitively; the Solana form is an exact-match
/// base58 key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminWalletConfig {
  /// 0x-prefixed EVM address (Ethereum and Polygon).
  pub evm_address: String,
  /// Base58 Solana public key.
  pub solana_address: String,
}

/// Etherscan-style explorer API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerApiConfig {
  /// Explorer API base URL.
  pub base_url: String,
  /// Explorer API key ("demo" works with heavy rate limits).
  #[serde(default = "default_api_key")]
  pub api_key: String,
}

/// Solana JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaRpcConfig {
  /// JSON-RPC HTTP endpoint.
  #[serde(default = "default_solana_rpc")]
  pub rpc_url: String,
}

impl Default for SolanaRpcConfig {
  fn default() -> Self {
    Self {
      rpc_url: default_solana_rpc(),
    }
  }
}

/// Outbound timeout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
  /// Per-request timeout for verification lookups (seconds).
  #[serde(default = "default_request_timeout")]
  pub request_seconds: u64,
  /// Per-branch timeout for fee oracle queries (seconds).
  #[serde(default = "default_fee_branch_timeout")]
  pub fee_branch_seconds: u64,
}

impl Default for TimeoutConfig {
  fn default() -> Self {
    Self {
      request_seconds: default_request_timeout(),
      fee_branch_seconds: default_fee_branch_timeout(),
    }
  }
}

/// Posting price for one chain, displayed to payers before they pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformFee {
  /// Price in the chain's native unit, as a decimal string.
  pub amount: String,
  /// Native currency symbol.
  pub currency: String,
  /// Indicative USD equivalent, as a decimal string.
  pub usd_equivalent: String,
}

/// Platform posting prices across all supported chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformFeeConfig {
  pub ethereum: PlatformFee,
  pub polygon: PlatformFee,
  pub solana: PlatformFee,
}

impl Default for PlatformFeeConfig {
  fn default() -> Self {
    Self {
      ethereum: PlatformFee {
        amount: "0.001".to_string(),
        currency: "ETH".to_string(),
        usd_equivalent: "2.50".to_string(),
      },
      polygon: PlatformFee {
        amount: "2".to_string(),
        currency: "MATIC".to_string(),
        usd_equivalent: "2.00".to_string(),
      },
      solana: PlatformFee {
        amount: "0.01".to_string(),
        currency: "SOL".to_string(),
        usd_equivalent: "2.30".to_string(),
      },
    }
  }
}

// Default value functions for serde

fn default_service_name() -> String {
  "chainpay-verifier".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_bind_address() -> String {
  "0.0.0.0:8080".to_string()
}

fn default_api_key() -> String {
  "demo".to_string()
}

fn default_ethereum_explorer() -> ExplorerApiConfig {
  ExplorerApiConfig {
    base_url: "https://api.etherscan.io/api".to_string(),
    api_key: default_api_key(),
  }
}

fn default_polygon_explorer() -> ExplorerApiConfig {
  ExplorerApiConfig {
    base_url: "https://api.polygonscan.com/api".to_string(),
    api_key: default_api_key(),
  }
}

fn default_solana_rpc() -> String {
  "https://api.devnet.solana.com".to_string()
}

fn default_request_timeout() -> u64 {
  10
}

fn default_fee_branch_timeout() -> u64 {
  5
}
