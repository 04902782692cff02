//! Solana Adapters - JSON-RPC Verification and Fee Probing
//!
//! Solana has no explorer proxy API; both verification and fee probing
//! go through the chain's JSON-RPC endpoint:
//! - `getTransaction` for payment verification (balance-delta model)
//! - `getRecentPerformanceSamples` as the fee source liveness probe

pub mod fees;
pub mod rpc;
pub mod types;
pub mod verifier;

pub use fees::SolanaFeeSource;
pub use rpc::SolanaRpcClient;
pub use verifier::SolanaVerifier;
