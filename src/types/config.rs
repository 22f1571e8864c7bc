//! Clustering configuration with fail-fast validation.

use serde::{Deserialize, Serialize};

use super::error::{ClusterError, ClusterResult};
use super::{
    DEFAULT_DROP_THRESHOLD, DEFAULT_HISTORY_WEIGHT, DEFAULT_MAX_CLUSTERS, DEFAULT_MERGE_THRESHOLD,
};

/// Settings governing one cluster set. Immutable once a set is minted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cosine similarity at or above which a vector (or another cluster)
    /// is absorbed instead of starting a new cluster. The default of 1.0
    /// disables similarity-triggered merging, leaving `max_clusters` as
    /// the dominant constraint.
    pub merge_threshold: f32,

    /// Fraction of the total member count below which a surviving cluster
    /// is removed by the explicit drop pass. 0.0 disables the pass.
    pub drop_threshold: f32,

    /// Upper bound on clusters per set. Once reached, every new vector is
    /// absorbed into its best-scoring cluster.
    pub max_clusters: usize,

    /// Centroid update rule. 0.0 keeps a plain running sum; any other
    /// value blends `centroid = w * centroid + (1 - w) * v` per addition.
    pub history_weight: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            drop_threshold: DEFAULT_DROP_THRESHOLD,
            max_clusters: DEFAULT_MAX_CLUSTERS,
            history_weight: DEFAULT_HISTORY_WEIGHT,
        }
    }
}

impl ClusterConfig {
    /// Create a config with the given fields.
    ///
    /// Values are NOT validated here - call `validate()` to check, or let
    /// `ClusterSetFactory::new` do it.
    pub fn new(
        merge_threshold: f32,
        drop_threshold: f32,
        max_clusters: usize,
        history_weight: f32,
    ) -> Self {
        Self {
            merge_threshold,
            drop_threshold,
            max_clusters,
            history_weight,
        }
    }

    /// Set the merge threshold.
    #[must_use]
    pub fn with_merge_threshold(mut self, threshold: f32) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Set the drop threshold.
    #[must_use]
    pub fn with_drop_threshold(mut self, threshold: f32) -> Self {
        self.drop_threshold = threshold;
        self
    }

    /// Set the maximum cluster count.
    #[must_use]
    pub fn with_max_clusters(mut self, max: usize) -> Self {
        self.max_clusters = max;
        self
    }

    /// Set the history weight.
    #[must_use]
    pub fn with_history_weight(mut self, weight: f32) -> Self {
        self.history_weight = weight;
        self
    }

    /// Validate all fields, returning the first violation found.
    pub fn validate(&self) -> ClusterResult<()> {
        if !(-1.0..=1.0).contains(&self.merge_threshold) {
            return Err(ClusterError::InvalidMergeThreshold(self.merge_threshold));
        }
        if !(0.0..1.0).contains(&self.drop_threshold) {
            return Err(ClusterError::InvalidDropThreshold(self.drop_threshold));
        }
        if self.max_clusters == 0 {
            return Err(ClusterError::InvalidMaxClusters(self.max_clusters));
        }
        if !(0.0..1.0).contains(&self.history_weight) {
            return Err(ClusterError::InvalidHistoryWeight(self.history_weight));
        }
        Ok(())
    }
}
