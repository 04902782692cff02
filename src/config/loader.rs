//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, applying environment variable
//! overrides for secrets, validating all parameters, and providing
//! clear error messages for misconfiguration.

use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// Environment overrides applied after parsing:
/// - `ETHERSCAN_API_KEY` / `POLYGONSCAN_API_KEY` - explorer API keys
/// - `SOLANA_RPC_URL` - Solana JSON-RPC endpoint
/// - `ADMIN_EVM_ADDRESS` / `ADMIN_SOLANA_ADDRESS` - recipient wallets
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let mut config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  apply_env_overrides(&mut config);
  validate_config(&config)?;

  info!(
    service = %config.service.name,
    bind = %config.service.bind_address,
    solana_rpc = %config.solana.rpc_url,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Apply environment variable overrides for secret-bearing fields.
///
/// Secrets belong in the environment, not in a checked-in TOML file.
fn apply_env_overrides(config: &mut AppConfig) {
  if let Ok(key) = std::env::var("ETHERSCAN_API_KEY") {
    config.ethereum.api_key = key;
  }
  if let Ok(key) = std::env::var("POLYGONSCAN_API_KEY") {
    config.polygon.api_key = key;
  }
  if let Ok(url) = std::env::var("SOLANA_RPC_URL") {
    config.solana.rpc_url = url;
  }
  if let Ok(addr) = std::env::var("ADMIN_EVM_ADDRESS") {
    config.admin.evm_address = addr;
  }
  if let Ok(addr) = std::env::var("ADMIN_SOLANA_ADDRESS") {
    config.admin.solana_address = addr;
  }
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Well-formed admin addresses (hex EVM, plausible base58 Solana)
/// - Non-empty provider endpoints
/// - Positive timeouts
fn validate_config(config: &AppConfig) -> Result<()> {
  // Admin wallet validation
  config
    .admin
    .evm_address
    .parse::<Address>()
    .with_context(|| {
      format!(
        "admin.evm_address is not a valid EVM address: {:?}",
        config.admin.evm_address
      )
    })?;

  anyhow::ensure!(
    !config.admin.solana_address.is_empty(),
    "admin.solana_address must not be empty"
  );
  anyhow::ensure!(
    config.admin.solana_address.len() >= 32
      && config.admin.solana_address.len() <= 44,
    "admin.solana_address is not a plausible base58 key: {:?}",
    config.admin.solana_address
  );

  // Endpoint validation
  anyhow::ensure!(
    !config.ethereum.base_url.is_empty(),
    "ethereum.base_url must not be empty"
  );
  anyhow::ensure!(
    !config.polygon.base_url.is_empty(),
    "polygon.base_url must not be empty"
  );
  anyhow::ensure!(
    !config.solana.rpc_url.is_empty(),
    "solana.rpc_url must not be empty"
  );

  // Timeout validation
  anyhow::ensure!(
    config.timeouts.request_seconds > 0,
    "timeouts.request_seconds must be positive"
  );
  anyhow::ensure!(
    config.timeouts.fee_branch_seconds > 0,
    "timeouts.fee_branch_seconds must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL_CONFIG: &str = r#"
    [admin]
    evm_address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F"
    solana_address = "4Nd1mYQqLyVUyyRpFzsLVbUGkkCPqCujoU2pkcF5bgeZ"
  "#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config: AppConfig = toml::from_str(MINIMAL_CONFIG).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.ethereum.base_url, "https://api.etherscan.io/api");
    assert_eq!(config.polygon.base_url, "https://api.polygonscan.com/api");
    assert_eq!(config.solana.rpc_url, "https://api.devnet.solana.com");
    assert_eq!(config.ethereum.api_key, "demo");
    assert_eq!(config.timeouts.request_seconds, 10);
    assert_eq!(config.platform_fees.ethereum.currency, "ETH");
  }

  #[test]
  fn test_invalid_evm_address_rejected() {
    let toml_src = r#"
      [admin]
      evm_address = "not-an-address"
      solana_address = "4Nd1mYQqLyVUyyRpFzsLVbUGkkCPqCujoU2pkcF5bgeZ"
    "#;
    let config: AppConfig = toml::from_str(toml_src).unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_short_solana_address_rejected() {
    let toml_src = r#"
      [admin]
      evm_address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F"
      solana_address = "abc"
    "#;
    let config: AppConfig = toml::from_str(toml_src).unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_zero_timeout_rejected() {
    let toml_src = r#"
      [admin]
      evm_address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F"
      solana_address = "4Nd1mYQqLyVUyyRpFzsLVbUGkkCPqCujoU2pkcF5bgeZ"

      [timeouts]
      request_seconds = 0
    "#;
    let config: AppConfig = toml::from_str(toml_src).unwrap();
    assert!(validate_config(&config).is_err());
  }
}
