//! Two-asset pooled-reserve exchange engine
//!
//! A [`Pool`] custodies reserves of two fungible assets and issues "shares",
//! proportional claims on those reserves. Participants deposit a pair of
//! amounts for shares, trade one asset for the other at the pool's pre-trade
//! marginal rate minus a fixed input fee, and redeem shares for a
//! proportional slice of both reserves.
//!
//! The engine never touches asset balances itself; all movement goes through
//! a [`TokenLedger`] collaborator. Every operation takes the caller's
//! identity explicitly and mutates the pool all-or-nothing: a failed
//! precondition or a failed transfer leaves reserves, supply, and the share
//! table untouched.
//!
//! Share-issuance and swap arithmetic live in the dependency-free
//! `pool_model` crate; this crate adds custody, the share-balance table,
//! events, and the error surface.

pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod token;
mod transitions;

pub use config::{ConfigError, PoolConfig};
pub use error::PoolError;
pub use events::PoolEvent;
pub use state::{AccountId, AssetId, Pool};
pub use token::{InMemoryTokens, TokenError, TokenLedger};

pub use pool_model::{BPS_SCALE, SWAP_FEE_BPS};
