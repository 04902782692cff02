//! Solana JSON-RPC Response Types
//!
//! Deserialization types for the `getTransaction` RPC method. Only the
//! fields this service interprets are modeled; everything else in the
//! (large) response payload is ignored.

use serde::Deserialize;

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcEnvelope<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Result payload of `getTransaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    /// Slot the transaction landed in; the confirmation signal.
    pub slot: Option<u64>,
    /// Execution metadata with balance arrays.
    pub meta: Option<TransactionMeta>,
    /// The transaction itself (json encoding).
    pub transaction: TransactionEnvelope,
}

/// Execution metadata of a landed transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    /// Execution error; null when the transaction succeeded. The shape
    /// varies by error type, so it stays an opaque JSON value.
    pub err: Option<serde_json::Value>,
    /// Lamport balances per account before execution.
    pub pre_balances: Vec<u64>,
    /// Lamport balances per account after execution.
    pub post_balances: Vec<u64>,
}

/// Transaction body wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEnvelope {
    pub message: TransactionMessage,
}

/// Transaction message with the ordered account list.
///
/// Balance arrays in the metadata are positional against this list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    pub account_keys: Vec<String>,
}
