//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! verifier's core workflows. Each use case is a self-contained
//! operation.
//!
//! Use cases:
//! - `VerificationDispatcher`: Chain selection + payment verification
//! - `FeeOracle`: Concurrent per-chain fee aggregation

pub mod dispatcher;
pub mod fee_oracle;

pub use dispatcher::{TransactionStatus, VerificationDispatcher};
pub use fee_oracle::FeeOracle;
