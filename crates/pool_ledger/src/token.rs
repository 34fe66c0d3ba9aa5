//! Asset collaborator: the interface the pool moves funds through
//!
//! The pool never holds balances itself. Deposits pull funds into the
//! custody account via [`TokenLedger::transfer_from`], withdrawals and trade
//! payouts push them back out via [`TokenLedger::transfer`]. Any call may
//! fail; the pool guarantees that a failure leaves its own accounting
//! untouched.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::state::{AccountId, AssetId};

/// Failures reported by the asset collaborator
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The debited account holds less than the requested amount.
    #[error("owner balance below requested amount")]
    InsufficientBalance,

    /// The owner has not authorized the recipient for the requested amount.
    #[error("spender allowance below requested amount")]
    InsufficientAllowance,

    /// Crediting the recipient would overflow its balance counter.
    #[error("balance overflow on credit")]
    BalanceOverflow,
}

/// Conventional fungible-asset semantics, scoped per [`AssetId`]
///
/// `transfer_from` treats the recipient as the authorized spender: the pool
/// pulls pre-authorized funds into its own custody account. Implementations
/// must apply each call atomically: a returned error means no balance moved.
pub trait TokenLedger {
    /// Move `amount` from `owner` to `recipient` against `owner`'s prior
    /// authorization of `recipient`.
    fn transfer_from(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Move `amount` out of `sender`'s own balance.
    fn transfer(
        &mut self,
        asset: AssetId,
        sender: AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> Result<(), TokenError>;

    fn balance_of(&self, asset: AssetId, account: AccountId) -> u64;
}

/// In-memory token book for deterministic tests and demos
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryTokens {
    balances: BTreeMap<(AssetId, AccountId), u64>,
    /// (asset, owner, spender) -> remaining authorization
    allowances: BTreeMap<(AssetId, AccountId, AccountId), u64>,
}

impl InMemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit freshly minted units to an account.
    pub fn mint(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow)?;
        Ok(())
    }

    /// Authorize `spender` to pull up to `amount` of `owner`'s balance.
    pub fn approve(&mut self, asset: AssetId, owner: AccountId, spender: AccountId, amount: u64) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    pub fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> u64 {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    fn move_balance(
        &mut self,
        asset: AssetId,
        sender: AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let sender_balance = self.balance_of(asset, sender);
        if sender_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        let recipient_balance = self.balance_of(asset, recipient);
        let credited = recipient_balance
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow)?;

        // both checks passed; mutate
        self.balances.insert((asset, sender), sender_balance - amount);
        self.balances.insert((asset, recipient), credited);
        Ok(())
    }
}

impl TokenLedger for InMemoryTokens {
    fn transfer_from(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let allowed = self.allowance(asset, owner, recipient);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        self.move_balance(asset, owner, recipient, amount)?;
        self.allowances
            .insert((asset, owner, recipient), allowed - amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        sender: AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        self.move_balance(asset, sender, recipient, amount)
    }

    fn balance_of(&self, asset: AssetId, account: AccountId) -> u64 {
        self.balances.get(&(asset, account)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> AssetId {
        AssetId::from_label("USDC").unwrap()
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut tokens = InMemoryTokens::new();
        let alice = AccountId::from_seed(1);
        let bob = AccountId::from_seed(2);

        tokens.mint(usdc(), alice, 100).unwrap();
        tokens.transfer(usdc(), alice, bob, 40).unwrap();

        assert_eq!(tokens.balance_of(usdc(), alice), 60);
        assert_eq!(tokens.balance_of(usdc(), bob), 40);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut tokens = InMemoryTokens::new();
        let alice = AccountId::from_seed(1);
        let bob = AccountId::from_seed(2);

        tokens.mint(usdc(), alice, 10).unwrap();
        let result = tokens.transfer(usdc(), alice, bob, 11);

        assert_eq!(result, Err(TokenError::InsufficientBalance));
        assert_eq!(tokens.balance_of(usdc(), alice), 10);
        assert_eq!(tokens.balance_of(usdc(), bob), 0);
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let mut tokens = InMemoryTokens::new();
        let alice = AccountId::from_seed(1);
        let pool = AccountId::from_seed(9);

        tokens.mint(usdc(), alice, 100).unwrap();
        tokens.approve(usdc(), alice, pool, 70);

        tokens.transfer_from(usdc(), alice, pool, 50).unwrap();
        assert_eq!(tokens.balance_of(usdc(), pool), 50);
        assert_eq!(tokens.allowance(usdc(), alice, pool), 20);

        // remaining allowance no longer covers another 50
        let result = tokens.transfer_from(usdc(), alice, pool, 50);
        assert_eq!(result, Err(TokenError::InsufficientAllowance));
    }

    #[test]
    fn test_transfer_from_without_approval() {
        let mut tokens = InMemoryTokens::new();
        let alice = AccountId::from_seed(1);
        let pool = AccountId::from_seed(9);

        tokens.mint(usdc(), alice, 100).unwrap();
        let result = tokens.transfer_from(usdc(), alice, pool, 1);

        assert_eq!(result, Err(TokenError::InsufficientAllowance));
        assert_eq!(tokens.balance_of(usdc(), alice), 100);
    }
}
