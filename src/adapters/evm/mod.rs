//! EVM Adapters - Explorer-backed Verification for Ethereum and Polygon
//!
//! Both EVM chains share one adapter implementation parameterized by
//! explorer endpoint and API key:
//! - Transaction lookup via `module=proxy&action=eth_getTransactionByHash`
//! - Gas estimates via `module=gastracker&action=gasoracle`

pub mod explorer;
pub mod gas;
pub mod types;
pub mod verifier;

pub use explorer::ExplorerClient;
pub use gas::EvmGasSource;
pub use verifier::EvmVerifier;
