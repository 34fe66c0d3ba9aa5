//! Pool state: identities, reserves, and the share-balance table

use core::fmt;
use std::collections::BTreeMap;

use pool_model::{BPS_SCALE, SWAP_FEE_BPS};

use crate::config::{ConfigError, PoolConfig};
use crate::events::PoolEvent;

/// Asset identifier (e.g. `b"USDC\0\0\0\0"`)
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(pub [u8; 8]);

impl AssetId {
    /// Build an id from a short label, zero-padded to 8 bytes.
    ///
    /// Returns `None` if the label is empty or longer than 8 bytes.
    pub fn from_label(label: &str) -> Option<Self> {
        let raw = label.as_bytes();
        if raw.is_empty() || raw.len() > 8 {
            return None;
        }
        let mut bytes = [0u8; 8];
        bytes[..raw.len()].copy_from_slice(raw);
        Some(Self(bytes))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(8);
        match core::str::from_utf8(&self.0[..end]) {
            Ok(label) if !label.is_empty() => f.write_str(label),
            _ => {
                for byte in self.0 {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Account identifier for share holders and the pool's custody account
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Deterministic id from a single seed byte, for tests and demos.
    pub fn from_seed(seed: u8) -> Self {
        Self([seed; 32])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // first 8 bytes are enough to tell accounts apart in logs
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        f.write_str("..")
    }
}

/// The pool ledger: two reserves, a share supply, and per-account balances
///
/// Reserves and the share table are only mutated inside the three operations
/// (`deposit`, `trade`, `withdraw`); there is no direct-write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    asset_a: AssetId,
    asset_b: AssetId,
    custody: AccountId,
    fee_bps: u16,
    pub(crate) reserve_a: u64,
    pub(crate) reserve_b: u64,
    pub(crate) total_shares: u64,
    pub(crate) shares: BTreeMap<AccountId, u64>,
    pub(crate) events: Vec<PoolEvent>,
}

impl Pool {
    /// Create a pool over two distinct assets with the standard 0.5% fee.
    pub fn new(asset_a: AssetId, asset_b: AssetId, custody: AccountId) -> Result<Self, ConfigError> {
        Self::with_fee(asset_a, asset_b, custody, SWAP_FEE_BPS)
    }

    /// Create a pool with an explicit fee in basis points.
    pub fn with_fee(
        asset_a: AssetId,
        asset_b: AssetId,
        custody: AccountId,
        fee_bps: u16,
    ) -> Result<Self, ConfigError> {
        if asset_a == asset_b {
            return Err(ConfigError::DuplicateAsset);
        }
        if fee_bps as u64 >= BPS_SCALE {
            return Err(ConfigError::Fee(fee_bps));
        }
        Ok(Self {
            asset_a,
            asset_b,
            custody,
            fee_bps,
            reserve_a: 0,
            reserve_b: 0,
            total_shares: 0,
            shares: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    /// Create a pool from a parsed [`PoolConfig`].
    pub fn from_config(config: &PoolConfig, custody: AccountId) -> Result<Self, ConfigError> {
        Self::with_fee(
            config.asset_a_id()?,
            config.asset_b_id()?,
            custody,
            config.fee_bps,
        )
    }

    pub fn asset_a_id(&self) -> AssetId {
        self.asset_a
    }

    pub fn asset_b_id(&self) -> AssetId {
        self.asset_b
    }

    /// The account the pool pulls deposits into and pays out from.
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    pub fn fee_bps(&self) -> u16 {
        self.fee_bps
    }

    pub fn reserve_a(&self) -> u64 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> u64 {
        self.reserve_b
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    pub fn share_balance(&self, account: AccountId) -> u64 {
        self.shares.get(&account).copied().unwrap_or(0)
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Drain the event journal, handing ownership of the entries to the caller.
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    /// Structural invariants: the share table sums to the supply, and a zero
    /// supply coincides exactly with empty reserves.
    pub fn invariants_hold(&self) -> bool {
        let mut sum: u128 = 0;
        for balance in self.shares.values() {
            sum += *balance as u128;
        }
        if sum != self.total_shares as u128 {
            return false;
        }
        (self.total_shares == 0) == (self.reserve_a == 0 && self.reserve_b == 0)
    }
}
