//! Tracker configuration.
//!
//! Tuning knobs for the per-user state map. Defaults suit a few thousand
//! users; large deployments should size `user_capacity` up front to avoid
//! rehashing under load.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Tracker configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Initial capacity of the user map.
    pub user_capacity: usize,

    /// Number of shards in the user map (power of two > 1).
    /// `None` lets the map pick from the CPU count.
    pub shard_amount: Option<usize>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            user_capacity: 1024,
            shard_amount: None,
        }
    }
}

impl TrackerConfig {
    /// Set the initial user capacity.
    #[must_use]
    pub fn with_user_capacity(mut self, capacity: usize) -> Self {
        self.user_capacity = capacity;
        self
    }

    /// Set an explicit shard amount.
    #[must_use]
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.shard_amount {
            Some(n) if n <= 1 || !n.is_power_of_two() => Err(ConfigError::InvalidShardAmount(n)),
            _ => Ok(()),
        }
    }
}
