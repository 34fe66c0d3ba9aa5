//! The three pool operations: deposit, trade, withdraw
//!
//! Each operation is one synchronous unit of work over (pool, tokens,
//! inputs): preconditions and arithmetic first, asset movement second,
//! internal commit last. A failure at any point returns before the commit,
//! so reserves, supply, and the share table never go through a
//! partially-updated state. Any second transfer leg that can strand funds
//! (deposit's second pull, trade's payout, withdraw's second payout) refunds
//! what already moved before returning.

use log::{debug, warn};
use pool_model::math;

use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::{AccountId, AssetId, Pool};
use crate::token::TokenLedger;

impl Pool {
    /// Deposit `(amount_a, amount_b)` for freshly issued shares.
    ///
    /// On an empty pool the deposit seeds the rate at one share per combined
    /// unit; on a funded pool shares are issued proportionally to the sum of
    /// reserves, floored. A deposit whose issuance floors to zero is
    /// rejected before any asset moves.
    pub fn deposit(
        &mut self,
        tokens: &mut dyn TokenLedger,
        caller: AccountId,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<u64, PoolError> {
        let issued = math::shares_for_deposit(
            self.reserve_a,
            self.reserve_b,
            self.total_shares,
            amount_a,
            amount_b,
        )?;
        if issued == 0 {
            warn!("deposit rejected: ({amount_a}, {amount_b}) issues zero shares");
            return Err(PoolError::SharesEqualZero(issued));
        }

        // compute the full post-state before anything moves
        let new_reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(PoolError::Overflow)?;
        let new_reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(PoolError::Overflow)?;
        let new_total = self
            .total_shares
            .checked_add(issued)
            .ok_or(PoolError::Overflow)?;
        let new_balance = self
            .share_balance(caller)
            .checked_add(issued)
            .ok_or(PoolError::Overflow)?;

        tokens.transfer_from(self.asset_a_id(), caller, self.custody(), amount_a)?;
        if let Err(err) = tokens.transfer_from(self.asset_b_id(), caller, self.custody(), amount_b)
        {
            // custody just received amount_a, so the refund cannot fail for
            // a conforming ledger
            let _ = tokens.transfer(self.asset_a_id(), self.custody(), caller, amount_a);
            return Err(err.into());
        }

        self.reserve_a = new_reserve_a;
        self.reserve_b = new_reserve_b;
        self.total_shares = new_total;
        self.shares.insert(caller, new_balance);
        self.events.push(PoolEvent::LiquidityAdded {
            account: caller,
            amount_a,
            amount_b,
        });
        debug!(
            "liquidity added: account={caller} amount_a={amount_a} amount_b={amount_b} \
             issued={issued} reserves=({}, {})",
            self.reserve_a, self.reserve_b
        );
        Ok(issued)
    }

    /// Trade `amount_in` of `asset_in` for the other asset of the pair.
    ///
    /// Priced at the pre-trade marginal rate `reserve_out / reserve_in`
    /// applied to the fee-adjusted input. The full input, fee included, is
    /// folded into the input reserve, so retained fees accrue to existing
    /// share holders. A trade that would drain past the output reserve is
    /// rejected outright rather than clamped.
    pub fn trade(
        &mut self,
        tokens: &mut dyn TokenLedger,
        caller: AccountId,
        asset_in: AssetId,
        amount_in: u64,
    ) -> Result<u64, PoolError> {
        let (reserve_in, reserve_out, asset_out) = if asset_in == self.asset_a_id() {
            (self.reserve_a, self.reserve_b, self.asset_b_id())
        } else if asset_in == self.asset_b_id() {
            (self.reserve_b, self.reserve_a, self.asset_a_id())
        } else {
            warn!("trade rejected: asset {asset_in} is not in the pair");
            return Err(PoolError::InvalidToken(asset_in));
        };

        let quote = math::quote_swap(reserve_in, reserve_out, self.fee_bps(), amount_in)?;

        // custody must be able to honor the payout before anything moves
        if tokens.balance_of(asset_out, self.custody()) < quote.amount_out {
            return Err(PoolError::InsufficientLiquidity);
        }

        tokens.transfer_from(asset_in, caller, self.custody(), amount_in)?;
        if let Err(err) = tokens.transfer(asset_out, self.custody(), caller, quote.amount_out) {
            let _ = tokens.transfer(asset_in, self.custody(), caller, amount_in);
            return Err(err.into());
        }

        if asset_in == self.asset_a_id() {
            self.reserve_a = quote.new_reserve_in;
            self.reserve_b = quote.new_reserve_out;
        } else {
            self.reserve_b = quote.new_reserve_in;
            self.reserve_a = quote.new_reserve_out;
        }
        self.events.push(PoolEvent::Swapped {
            account: caller,
            asset_in,
            amount_in,
            asset_out,
            amount_out: quote.amount_out,
        });
        debug!(
            "swapped: account={caller} {amount_in} {asset_in} -> {} {asset_out} \
             reserves=({}, {})",
            quote.amount_out, self.reserve_a, self.reserve_b
        );
        Ok(quote.amount_out)
    }

    /// Redeem `shares` for a proportional slice of both reserves.
    ///
    /// Both slices floor, leaving residual dust with the pool. Redeeming the
    /// entire supply drains the reserves to exactly zero, which re-enables
    /// the empty-pool deposit path. A zero request, a request above the
    /// supply, and a caller balance below the request all fail the same way,
    /// matching the single-error contract of the reference behavior.
    pub fn withdraw(
        &mut self,
        tokens: &mut dyn TokenLedger,
        caller: AccountId,
        shares: u64,
    ) -> Result<(u64, u64), PoolError> {
        let held = self.share_balance(caller);
        if shares == 0 || shares > self.total_shares || held < shares {
            warn!(
                "withdraw rejected: account={caller} requested={shares} held={held} \
                 supply={}",
                self.total_shares
            );
            return Err(PoolError::SharesEqualZero(0));
        }

        let (amount_a, amount_b) =
            math::redeem_amounts(self.reserve_a, self.reserve_b, self.total_shares, shares)?;

        // both payouts must be honorable before either moves
        if tokens.balance_of(self.asset_a_id(), self.custody()) < amount_a
            || tokens.balance_of(self.asset_b_id(), self.custody()) < amount_b
        {
            return Err(PoolError::InsufficientLiquidity);
        }

        tokens.transfer(self.asset_a_id(), self.custody(), caller, amount_a)?;
        if let Err(err) = tokens.transfer(self.asset_b_id(), self.custody(), caller, amount_b) {
            // the caller just received amount_a and custody just debited it,
            // so the refund cannot fail for a conforming ledger
            let _ = tokens.transfer(self.asset_a_id(), caller, self.custody(), amount_a);
            return Err(err.into());
        }

        let remaining = held - shares;
        if remaining == 0 {
            self.shares.remove(&caller);
        } else {
            self.shares.insert(caller, remaining);
        }
        self.total_shares -= shares;
        self.reserve_a -= amount_a;
        self.reserve_b -= amount_b;
        self.events.push(PoolEvent::LiquidityRemoved {
            account: caller,
            amount_a,
            amount_b,
        });
        debug!(
            "liquidity removed: account={caller} shares={shares} \
             returned=({amount_a}, {amount_b}) reserves=({}, {})",
            self.reserve_a, self.reserve_b
        );
        Ok((amount_a, amount_b))
    }
}
