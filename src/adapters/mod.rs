//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (explorer HTTP APIs, Solana JSON-RPC, the
//! inbound HTTP surface). Each sub-module groups adapters by
//! infrastructure concern.
//!
//! Adapter categories:
//! - `evm`: Etherscan-style explorer clients for Ethereum and Polygon
//! - `solana`: Solana JSON-RPC client, verifier and fee source
//! - `http`: Inbound axum API exposing the verification contract
//! - `metrics`: Prometheus metrics registry

pub mod evm;
pub mod http;
pub mod metrics;
pub mod solana;
