//! Notifications emitted once per successful mutating operation

use crate::state::{AccountId, AssetId};

/// One entry in the pool's event journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    /// A deposit credited shares against pulled reserves.
    LiquidityAdded {
        account: AccountId,
        amount_a: u64,
        amount_b: u64,
    },

    /// A withdrawal redeemed shares for a slice of both reserves.
    LiquidityRemoved {
        account: AccountId,
        amount_a: u64,
        amount_b: u64,
    },

    /// A trade exchanged one asset for the other against reserves.
    Swapped {
        account: AccountId,
        asset_in: AssetId,
        amount_in: u64,
        asset_out: AssetId,
        amount_out: u64,
    },
}
