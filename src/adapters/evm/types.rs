//! Explorer API Response Types
//!
//! Defines the deserialization types for etherscan-style explorer
//! responses. The proxy module passes raw JSON-RPC payloads through,
//! so quantities arrive as 0x-prefixed hex strings.

use serde::Deserialize;

/// Envelope for `module=proxy` explorer calls.
///
/// `result` is the raw JSON-RPC result: an object for a known
/// transaction, `null` for an unknown one. Rate-limit errors put a
/// plain string here, which fails deserialization and is surfaced as a
/// provider error upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyEnvelope {
    pub result: Option<EvmTransaction>,
}

/// One transaction as returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmTransaction {
    /// Transaction hash, echoed back by the provider.
    pub hash: String,
    /// Recipient address. Absent for contract-creation transactions.
    pub to: Option<String>,
    /// Transfer value in wei, hex-encoded.
    pub value: String,
    /// Inclusion block, hex-encoded. Null while still in the mempool.
    pub block_number: Option<String>,
}

/// Envelope for `module=gastracker` explorer calls.
///
/// Unlike the proxy module, gastracker uses the explorer's own
/// status/message/result convention; `result` degrades to an error
/// string when `status != "1"`, so it is kept raw until checked.
#[derive(Debug, Clone, Deserialize)]
pub struct GasOracleEnvelope {
    pub status: String,
    pub message: String,
    pub result: serde_json::Value,
}

/// Gas price tiers reported by the gastracker module.
#[derive(Debug, Clone, Deserialize)]
pub struct GasOracleTiers {
    #[serde(rename = "SafeGasPrice")]
    pub safe_gas_price: String,
    #[serde(rename = "ProposeGasPrice")]
    pub propose_gas_price: String,
    #[serde(rename = "FastGasPrice")]
    pub fast_gas_price: String,
}

/// Parse a 0x-prefixed hex quantity into an integer wei amount.
pub fn parse_hex_quantity(raw: &str) -> Option<u128> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}
