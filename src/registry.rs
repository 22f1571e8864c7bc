//! Key-partitioned registry: maps each key to its own cluster set, created
//! lazily and race-free on first add.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::clustering::{ClusterSet, ClusterSetFactory};
use crate::types::{ClusterError, ClusterResult};
use crate::vector::FeatureVec;

/// Maps key -> [`ClusterSet`], partitioning the clustering problem into
/// independent sub-problems (e.g. one set per word).
///
/// An explicit, caller-owned instance: construct one from a factory and
/// share it across producer threads behind an `Arc`. Map mutation is
/// serialized by a registry-wide lock; operations against different keys
/// proceed fully in parallel through each key's own `Arc<ClusterSet>`.
pub struct ClusterKeyRegistry {
    /// Per-key sets. At most one set is ever retained per key, even under
    /// concurrent first access.
    sets: RwLock<HashMap<String, Arc<ClusterSet>>>,
    /// Mints the set for each newly seen key.
    factory: ClusterSetFactory,
}

impl ClusterKeyRegistry {
    /// Create an empty registry that mints sets from the given factory.
    pub fn new(factory: ClusterSetFactory) -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
            factory,
        }
    }

    /// Feed a vector under a key, creating the key's cluster set on first
    /// use. Returns the index of the cluster that received the vector.
    pub fn add_vector(&self, key: &str, v: FeatureVec) -> usize {
        self.get_or_create(key).add_vector(v)
    }

    /// Classify a vector against a key's existing clusters without mutating
    /// anything. `None` when the key has no cluster set (one is never
    /// created here) or the set holds no clusters.
    pub fn assign_vector(&self, key: &str, v: &[f32]) -> Option<usize> {
        self.get(key)?.assign_vector(v)
    }

    /// Member lists of a key's clusters, or `None` for an unknown key.
    pub fn get_clusters(&self, key: &str) -> Option<Vec<Vec<FeatureVec>>> {
        self.get(key).map(|set| set.get_clusters())
    }

    /// Number of clusters under a key; 0 for an unknown key.
    pub fn get_num_clusters(&self, key: &str) -> usize {
        self.get(key).map_or(0, |set| set.num_clusters())
    }

    /// Consolidate a key's near-duplicate clusters. Delegates to
    /// [`ClusterSet::finalize`]; see there for the index convention of the
    /// returned map. Calling this for a key that was never fed a vector is
    /// a precondition violation and fails with
    /// [`ClusterError::UnknownKey`].
    pub fn finalize_clustering(&self, key: &str) -> ClusterResult<HashMap<usize, usize>> {
        self.get(key)
            .ok_or_else(|| ClusterError::UnknownKey(key.to_string()))?
            .finalize()
    }

    /// Run the explicit drop pass for a key. Returns how many clusters were
    /// removed; unknown keys fail the same way as `finalize_clustering`.
    pub fn drop_clusters(&self, key: &str) -> ClusterResult<usize> {
        Ok(self
            .get(key)
            .ok_or_else(|| ClusterError::UnknownKey(key.to_string()))?
            .drop_clusters())
    }

    /// Discard a key's cluster set entirely.
    pub fn remove_clusters(&self, key: &str) {
        self.sets.write().unwrap().remove(key);
    }

    /// Discard every cluster set.
    pub fn clear(&self) {
        self.sets.write().unwrap().clear();
    }

    /// Number of keys with a cluster set.
    pub fn len(&self) -> usize {
        self.sets.read().unwrap().len()
    }

    /// Whether no key has a cluster set yet.
    pub fn is_empty(&self) -> bool {
        self.sets.read().unwrap().is_empty()
    }

    /// All keys with a cluster set, in arbitrary order.
    pub fn keys(&self) -> Vec<String> {
        self.sets.read().unwrap().keys().cloned().collect()
    }

    /// Shared handle to a key's cluster set, for consumers that need more
    /// than the member lists (centroids, per-cluster counts). `None` for an
    /// unknown key; never creates a set.
    pub fn get_set(&self, key: &str) -> Option<Arc<ClusterSet>> {
        self.get(key)
    }

    /// Shared handle to a key's set, if one exists.
    fn get(&self, key: &str) -> Option<Arc<ClusterSet>> {
        self.sets.read().unwrap().get(key).cloned()
    }

    /// Get-or-create with the double-checked pattern: read-lock fast path,
    /// then recheck under the write lock so concurrent first adds for the
    /// same key retain a single constructed instance.
    fn get_or_create(&self, key: &str) -> Arc<ClusterSet> {
        if let Some(set) = self.get(key) {
            return set;
        }
        let mut sets = self.sets.write().unwrap();
        Arc::clone(sets.entry(key.to_string()).or_insert_with(|| {
            log::debug!("Created cluster set for key {:?}", key);
            Arc::new(self.factory.new_clustering_instance())
        }))
    }
}

impl Default for ClusterKeyRegistry {
    fn default() -> Self {
        Self::new(ClusterSetFactory::default())
    }
}
