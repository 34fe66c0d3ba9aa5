//! Error surface of the pool ledger

use pool_model::PoolMathError;
use thiserror::Error;

use crate::state::AssetId;
use crate::token::TokenError;

/// Precondition failures for the three pool operations
///
/// Every variant aborts the whole operation with no internal mutation; none
/// are retryable without changing the inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The operation would move zero shares; carries the computed value.
    #[error("computed share movement is zero ({0})")]
    SharesEqualZero(u64),

    /// A trade named an asset outside the pool's configured pair.
    #[error("asset {0} is not part of this pool's pair")]
    InvalidToken(AssetId),

    /// The pool cannot quote or honor the requested output.
    #[error("insufficient reserves to honor the operation")]
    InsufficientLiquidity,

    /// Reserve or share counters would overflow; never wrapped silently.
    #[error("arithmetic overflow in reserve or share accounting")]
    Overflow,

    /// The asset collaborator refused a transfer.
    #[error("asset transfer failed: {0}")]
    Token(#[from] TokenError),
}

impl From<PoolMathError> for PoolError {
    fn from(err: PoolMathError) -> Self {
        match err {
            PoolMathError::InvalidReserves | PoolMathError::InsufficientLiquidity => {
                PoolError::InsufficientLiquidity
            }
            // a bad fee is rejected at pool construction, so at operation
            // time both remaining cases are fatal arithmetic
            PoolMathError::InvalidFee | PoolMathError::Overflow => PoolError::Overflow,
        }
    }
}
