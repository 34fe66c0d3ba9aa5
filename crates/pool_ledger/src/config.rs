//! Pool configuration
//!
//! A pool is described by its two asset labels and a fee in basis points,
//! loadable from TOML:
//!
//! ```toml
//! asset_a = "USDC"
//! asset_b = "WETH"
//! fee_bps = 50
//! ```

use pool_model::SWAP_FEE_BPS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::AssetId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse pool config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("asset label {0:?} is empty or longer than 8 bytes")]
    AssetLabel(String),

    #[error("pool requires two distinct assets")]
    DuplicateAsset,

    #[error("fee of {0} bps is at or above 100%")]
    Fee(u16),
}

/// Declarative pool description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Label of the first asset of the pair
    pub asset_a: String,

    /// Label of the second asset of the pair
    pub asset_b: String,

    /// Trade fee in basis points, retained from every trade's input
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u16,
}

fn default_fee_bps() -> u16 {
    SWAP_FEE_BPS
}

impl PoolConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn asset_a_id(&self) -> Result<AssetId, ConfigError> {
        AssetId::from_label(&self.asset_a)
            .ok_or_else(|| ConfigError::AssetLabel(self.asset_a.clone()))
    }

    pub fn asset_b_id(&self) -> Result<AssetId, ConfigError> {
        AssetId::from_label(&self.asset_b)
            .ok_or_else(|| ConfigError::AssetLabel(self.asset_b.clone()))
    }
}
