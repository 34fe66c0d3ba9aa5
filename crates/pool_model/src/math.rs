//! Constant-sum pool math - share issuance, swap quoting, redemption

use crate::{BPS_SCALE, PoolMathError};

/// Swap quote with post-trade reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Amount of the output asset owed to the trader
    pub amount_out: u64,

    /// Input-side reserve after the trade (full input retained, fee included)
    pub new_reserve_in: u64,

    /// Output-side reserve after the trade
    pub new_reserve_out: u64,
}

/// Calculate shares to issue for a deposit of `(amount_a, amount_b)`
///
/// - Empty pool: `issued = amount_a + amount_b`, seeding the rate at one
///   share per combined unit deposited.
/// - Funded pool: `issued = (amount_a + amount_b) · S / (reserve_a + reserve_b)`,
///   floored, so each depositor's claim stays proportional to contributed
///   value under the pool's unit of account (sum of reserves).
///
/// The caller decides what a zero result means; this function only reports
/// arithmetic failures.
pub fn shares_for_deposit(
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
    amount_a: u64,
    amount_b: u64,
) -> Result<u64, PoolMathError> {
    let contributed = amount_a
        .checked_add(amount_b)
        .ok_or(PoolMathError::Overflow)?;

    if total_shares == 0 {
        return Ok(contributed);
    }

    // reserve_a + reserve_b cannot overflow in u128
    let pooled = reserve_a as u128 + reserve_b as u128;
    if pooled == 0 {
        // funded supply over empty reserves is unreachable pool state
        return Err(PoolMathError::InvalidReserves);
    }

    let issued = (contributed as u128)
        .checked_mul(total_shares as u128)
        .ok_or(PoolMathError::Overflow)?
        / pooled;

    if issued > u64::MAX as u128 {
        return Err(PoolMathError::Overflow);
    }

    Ok(issued as u64)
}

/// Calculate a swap quote against pre-trade reserves
///
/// With fee on input:
/// - `after_fee = amount_in · (BPS_SCALE - fee_bps) / BPS_SCALE`
/// - `amount_out = after_fee · reserve_out / reserve_in`
///
/// Both divisions floor, rounding in the pool's favor. The fee remainder is
/// never paid out; the ledger folds the full `amount_in` back into the input
/// reserve, so retained fees accrue to existing share holders.
///
/// # Errors
/// * `InvalidFee` if `fee_bps >= BPS_SCALE`
/// * `InvalidReserves` if `reserve_in == 0` (no marginal rate exists)
/// * `InsufficientLiquidity` if the quote would drain more than `reserve_out`
/// * `Overflow` if the input reserve cannot absorb `amount_in`
pub fn quote_swap(
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
    amount_in: u64,
) -> Result<SwapQuote, PoolMathError> {
    if fee_bps as u64 >= BPS_SCALE {
        return Err(PoolMathError::InvalidFee);
    }
    if reserve_in == 0 {
        return Err(PoolMathError::InvalidReserves);
    }

    // u64 · 10^4 and u64 · u64 both fit in u128
    let after_fee = (amount_in as u128) * (BPS_SCALE - fee_bps as u64) as u128 / BPS_SCALE as u128;
    let amount_out = after_fee * reserve_out as u128 / reserve_in as u128;

    if amount_out > reserve_out as u128 {
        return Err(PoolMathError::InsufficientLiquidity);
    }

    let new_reserve_in = reserve_in
        .checked_add(amount_in)
        .ok_or(PoolMathError::Overflow)?;

    Ok(SwapQuote {
        amount_out: amount_out as u64,
        new_reserve_in,
        new_reserve_out: reserve_out - amount_out as u64,
    })
}

/// Calculate the reserve slice owed for redeeming `shares`
///
/// `amount_x = shares · reserve_x / total_shares`, floored, so residual dust
/// stays with the pool rather than over-paying the redeemer.
///
/// # Errors
/// * `InvalidReserves` if `total_shares == 0`
/// * `InsufficientLiquidity` if `shares > total_shares`
pub fn redeem_amounts(
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
    shares: u64,
) -> Result<(u64, u64), PoolMathError> {
    if total_shares == 0 {
        return Err(PoolMathError::InvalidReserves);
    }
    if shares > total_shares {
        return Err(PoolMathError::InsufficientLiquidity);
    }

    // shares <= total_shares, so each quotient is <= the reserve
    let amount_a = (shares as u128) * reserve_a as u128 / total_shares as u128;
    let amount_b = (shares as u128) * reserve_b as u128 / total_shares as u128;

    Ok((amount_a as u64, amount_b as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SWAP_FEE_BPS;

    #[test]
    fn test_seed_deposit_issues_sum() {
        let issued = shares_for_deposit(0, 0, 0, 100, 100).unwrap();
        assert_eq!(issued, 200);
    }

    #[test]
    fn test_proportional_deposit_after_skew() {
        // Reserves skewed by a prior swap: (110, 91), supply 200.
        // issued = floor(200 * 200 / 201) = 199
        let issued = shares_for_deposit(110, 91, 200, 100, 100).unwrap();
        assert_eq!(issued, 200u64 * 200 / 201);
        assert!(issued < 200, "skewed pool must issue below par");
    }

    #[test]
    fn test_deposit_rounds_toward_pool() {
        // floor(1 * 200 / 201) = 0, tiny deposits round to nothing
        let issued = shares_for_deposit(110, 91, 200, 1, 0).unwrap();
        assert_eq!(issued, 0);
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        assert_eq!(
            shares_for_deposit(0, 0, 0, u64::MAX, 1),
            Err(PoolMathError::Overflow)
        );
        assert_eq!(
            shares_for_deposit(1, 0, u64::MAX, u64::MAX, 0),
            Err(PoolMathError::Overflow)
        );
    }

    #[test]
    fn test_funded_supply_over_empty_reserves_rejected() {
        assert_eq!(
            shares_for_deposit(0, 0, 10, 5, 5),
            Err(PoolMathError::InvalidReserves)
        );
    }

    #[test]
    fn test_quote_balanced_pool() {
        // after_fee = floor(10 * 9950 / 10000) = 9, out = floor(9 * 100 / 100) = 9
        let quote = quote_swap(100, 100, SWAP_FEE_BPS, 10).unwrap();
        assert_eq!(quote.amount_out, 9);
        assert_eq!(quote.new_reserve_in, 110);
        assert_eq!(quote.new_reserve_out, 91);
    }

    #[test]
    fn test_quote_prices_at_pretrade_rate() {
        // Skewed reserves (110, 91): out = floor(9 * 91 / 110) = 7
        let quote = quote_swap(110, 91, SWAP_FEE_BPS, 10).unwrap();
        assert_eq!(quote.amount_out, 9 * 91 / 110);
        assert_eq!(quote.new_reserve_in, 120);
        assert_eq!(quote.new_reserve_out, 91 - 9 * 91 / 110);
    }

    #[test]
    fn test_quote_retains_full_input() {
        let quote = quote_swap(1_000_000, 500, SWAP_FEE_BPS, 777).unwrap();
        assert_eq!(quote.new_reserve_in, 1_000_777);
    }

    #[test]
    fn test_quote_zero_output_allowed() {
        // after_fee = 0 for a 1-unit input
        let quote = quote_swap(100, 100, SWAP_FEE_BPS, 1).unwrap();
        assert_eq!(quote.amount_out, 0);
        assert_eq!(quote.new_reserve_out, 100);
    }

    #[test]
    fn test_quote_oversized_trade_rejected() {
        // after_fee ≈ 995_000 against reserve_in = 10 drains far past reserve_out
        assert_eq!(
            quote_swap(10, 100, SWAP_FEE_BPS, 1_000_000),
            Err(PoolMathError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_quote_empty_pool_rejected() {
        assert_eq!(
            quote_swap(0, 0, SWAP_FEE_BPS, 10),
            Err(PoolMathError::InvalidReserves)
        );
    }

    #[test]
    fn test_quote_reserve_overflow_rejected() {
        assert_eq!(
            quote_swap(u64::MAX, 0, SWAP_FEE_BPS, 1),
            Err(PoolMathError::Overflow)
        );
    }

    #[test]
    fn test_quote_fee_at_or_above_scale_rejected() {
        assert_eq!(
            quote_swap(100, 100, 10_000, 10),
            Err(PoolMathError::InvalidFee)
        );
    }

    #[test]
    fn test_redeem_full_supply_drains_reserves() {
        let (a, b) = redeem_amounts(110, 91, 200, 200).unwrap();
        assert_eq!((a, b), (110, 91));
    }

    #[test]
    fn test_redeem_rounds_toward_pool() {
        // floor(1 * 110 / 3) = 36, floor(1 * 91 / 3) = 30
        let (a, b) = redeem_amounts(110, 91, 3, 1).unwrap();
        assert_eq!((a, b), (36, 30));
    }

    #[test]
    fn test_redeem_rejects_empty_and_oversized() {
        assert_eq!(
            redeem_amounts(0, 0, 0, 1),
            Err(PoolMathError::InvalidReserves)
        );
        assert_eq!(
            redeem_amounts(100, 100, 200, 201),
            Err(PoolMathError::InsufficientLiquidity)
        );
    }
}
