//! Factory minting fresh cluster sets from one validated config.

use crate::types::{ClusterConfig, ClusterResult};

use super::set::ClusterSet;

/// Immutable, pre-validated configuration that mints fresh [`ClusterSet`]s.
///
/// Pure factory: minted instances share nothing with each other or with the
/// factory beyond a copy of the settings.
#[derive(Debug, Clone)]
pub struct ClusterSetFactory {
    config: ClusterConfig,
}

impl ClusterSetFactory {
    /// Create a factory, validating the config before any set is minted.
    pub fn new(config: ClusterConfig) -> ClusterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Mint a fresh, empty cluster set carrying this factory's config.
    pub fn new_clustering_instance(&self) -> ClusterSet {
        ClusterSet::new(self.config)
    }

    /// The config every minted set will carry.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

impl Default for ClusterSetFactory {
    fn default() -> Self {
        Self {
            config: ClusterConfig::default(),
        }
    }
}
