//! Pool Model - Pure constant-sum share and swap math
//!
//! This crate contains the share-issuance, swap-quote, and redemption
//! formulas for the two-asset pool, extracted from the ledger crate so the
//! arithmetic can be exercised in isolation.
//!
//! All functions are total: every overflow and every division by an empty
//! reserve is reported through [`PoolMathError`], never panicked on.

#![no_std]

pub mod math;

pub use math::{SwapQuote, quote_swap, redeem_amounts, shares_for_deposit};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Swap fee retained from every trade's input, in basis points (0.5%)
pub const SWAP_FEE_BPS: u16 = 50;

/// Error types for pool math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolMathError {
    /// Reserves are inconsistent with the share supply (e.g. funded supply
    /// over empty reserves)
    InvalidReserves,
    /// The fee would consume the whole input
    InvalidFee,
    /// Quote would drain more than the output reserve holds
    InsufficientLiquidity,
    /// Arithmetic overflow
    Overflow,
}
