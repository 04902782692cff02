//! Exact base-unit conversions for on-chain amounts.
//!
//! Every chain reports transfer values in its smallest integer unit
//! (wei for EVM chains, lamports for Solana). Threshold comparisons
//! against expected payment amounts happen in the native unit, so the
//! conversion must be exact: binary floating point misclassifies
//! amounts near the threshold. `rust_decimal` gives us a 96-bit
//! fixed-point mantissa, which covers every realistic on-chain value.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Decimal places between wei and ETH/MATIC (1 ETH = 10^18 wei).
pub const WEI_SCALE: u32 = 18;

/// Decimal places between lamports and SOL (1 SOL = 10^9 lamports).
pub const LAMPORT_SCALE: u32 = 9;

/// Convert a raw wei amount into its native-unit decimal.
///
/// Returns `None` when the amount exceeds the 96-bit decimal mantissa
/// (around 7.9e10 ETH — far beyond total supply, so a `None` here
/// means the provider handed us garbage).
pub fn wei_to_native(wei: u128) -> Option<Decimal> {
    let wei = i128::try_from(wei).ok()?;
    Decimal::try_from_i128_with_scale(wei, WEI_SCALE).ok()
}

/// Convert a native-unit decimal back into wei.
///
/// Returns `None` for negative amounts, amounts with sub-wei precision,
/// or amounts too large for `u128`.
pub fn native_to_wei(amount: Decimal) -> Option<u128> {
    let scaled = amount.checked_mul(Decimal::from(10u64.pow(WEI_SCALE)))?;
    if scaled.fract() != Decimal::ZERO {
        return None;
    }
    scaled.to_u128()
}

/// Convert a pre/post lamport balance pair into the SOL delta.
///
/// The delta is negative when the account paid out more than it
/// received in the transaction.
pub fn lamport_delta_to_sol(pre: u64, post: u64) -> Decimal {
    let delta = i128::from(post) - i128::from(pre);
    // A difference of two u64 values always fits the 96-bit mantissa.
    Decimal::from_i128_with_scale(delta, LAMPORT_SCALE)
}
