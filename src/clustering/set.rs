//! Online cluster set for one key: snapshot-scored assignment plus a
//! run-once agglomerative consolidation pass.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::types::{ClusterConfig, ClusterError, ClusterResult};
use crate::vector::FeatureVec;

use super::cluster::Cluster;

/// An ordered, growable collection of clusters for one key.
///
/// Vectors stream in through [`add_vector`](Self::add_vector); clusters are
/// created up to `max_clusters`, after which every vector is absorbed into
/// its best-scoring cluster. A single [`finalize`](Self::finalize) call
/// consolidates near-duplicate clusters once producer traffic has stopped.
pub struct ClusterSet {
    /// Authoritative cluster list. Append-only until finalize compacts it.
    clusters: RwLock<Vec<Cluster>>,
    /// Immutable settings, copied from the minting factory.
    config: ClusterConfig,
    /// Set by the first finalize call; a second call is an error.
    finalized: AtomicBool,
}

impl ClusterSet {
    /// Create an empty set. Construction goes through
    /// [`ClusterSetFactory`](super::ClusterSetFactory), which validates the
    /// config first.
    pub(crate) fn new(config: ClusterConfig) -> Self {
        Self {
            clusters: RwLock::new(Vec::new()),
            config,
            finalized: AtomicBool::new(false),
        }
    }

    /// Absorb `v` into the best-matching cluster, or start a new cluster.
    /// Returns the index of the cluster that received the vector.
    ///
    /// Scoring runs against a read-locked snapshot; only the
    /// decide-and-mutate step takes the write lock. Concurrent producers may
    /// therefore race to create near-duplicate clusters (the list can
    /// transiently exceed `max_clusters` by at most one cluster per racing
    /// thread); `finalize` reconciles them afterwards. Serializing the whole
    /// call would destroy throughput under concurrent load.
    pub fn add_vector(&self, v: FeatureVec) -> usize {
        let best = {
            let clusters = self.clusters.read().unwrap();
            self.best_match(&clusters, &v)
        };

        let mut clusters = self.clusters.write().unwrap();
        match best {
            Some((index, score))
                if score >= self.config.merge_threshold
                    || clusters.len() >= self.config.max_clusters =>
            {
                clusters[index].add_vector(v);
                index
            }
            _ => {
                clusters.push(Cluster::new(v, self.config.history_weight));
                clusters.len() - 1
            }
        }
    }

    /// Classify `v` against the current clusters without mutating anything.
    /// Returns the best-scoring index, or `None` while the set is empty.
    pub fn assign_vector(&self, v: &[f32]) -> Option<usize> {
        let clusters = self.clusters.read().unwrap();
        self.best_match(&clusters, v).map(|(index, _)| index)
    }

    /// Arg-max of centroid similarity. Ties go to the lowest index.
    fn best_match(&self, clusters: &[Cluster], v: &[f32]) -> Option<(usize, f32)> {
        if clusters.is_empty() {
            return None;
        }
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, cluster) in clusters.iter().enumerate() {
            let score = cluster.compare_with_vector(v);
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        Some((best, best_score))
    }

    /// Consolidate near-duplicate clusters and compact the list.
    ///
    /// Repeatedly sweeps every surviving pair, merging `j` into `i` (i < j)
    /// whenever their centroid similarity reaches `merge_threshold`, until a
    /// full sweep performs no merges. Absorbed entries are then removed and
    /// later indices shift down.
    ///
    /// The returned map uses PRE-compaction indices on both sides: each
    /// absorbed cluster's original index maps to the original index of the
    /// cluster it transitively ended up in. Callers that follow up with
    /// [`get_cluster`](Self::get_cluster) must re-resolve against the
    /// compacted list.
    ///
    /// Must run single-threaded, after producer traffic for this key has
    /// stopped; calling it concurrently with `add_vector` is unsupported.
    /// A second call returns [`ClusterError::AlreadyFinalized`].
    pub fn finalize(&self) -> ClusterResult<HashMap<usize, usize>> {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return Err(ClusterError::AlreadyFinalized);
        }

        let mut clusters = self.clusters.write().unwrap();
        let count = clusters.len();
        let mut merges = DisjointSet::new(count);
        let mut absorbed = vec![false; count];

        loop {
            let mut merged_any = false;
            for i in 0..count {
                if absorbed[i] {
                    continue;
                }
                for j in (i + 1)..count {
                    if absorbed[j] {
                        continue;
                    }
                    let sim = clusters[i].cluster_similarity(&clusters[j]);
                    if sim >= self.config.merge_threshold {
                        let (head, tail) = clusters.split_at_mut(j);
                        head[i].add_cluster(&tail[0]);
                        absorbed[j] = true;
                        merges.union_into(j, i);
                        merged_any = true;
                    }
                }
            }
            if !merged_any {
                break;
            }
        }

        let mut index = 0;
        clusters.retain(|_| {
            let keep = !absorbed[index];
            index += 1;
            keep
        });

        let mut remap = HashMap::new();
        for j in 0..count {
            if absorbed[j] {
                remap.insert(j, merges.find(j));
            }
        }
        if !remap.is_empty() {
            log::debug!(
                "Consolidated {} clusters into {} ({} absorbed)",
                count,
                clusters.len(),
                remap.len()
            );
        }
        Ok(remap)
    }

    /// Remove surviving clusters whose member count falls strictly below
    /// `drop_threshold` of the total member count. Explicit opt-in pass;
    /// `finalize` never invokes it. Returns how many clusters were dropped.
    pub fn drop_clusters(&self) -> usize {
        if self.config.drop_threshold == 0.0 {
            return 0;
        }
        let mut clusters = self.clusters.write().unwrap();
        let total: usize = clusters.iter().map(Cluster::total_member_count).sum();
        let cutoff = self.config.drop_threshold * total as f32;
        let before = clusters.len();
        clusters.retain(|c| c.total_member_count() as f32 >= cutoff);
        let dropped = before - clusters.len();
        if dropped > 0 {
            log::debug!(
                "Dropped {} low-membership clusters ({} remain)",
                dropped,
                clusters.len()
            );
        }
        dropped
    }

    /// Get a cluster by index (cloned view over the current list).
    pub fn get_cluster(&self, index: usize) -> Option<Cluster> {
        self.clusters.read().unwrap().get(index).cloned()
    }

    /// Member lists of every cluster, in list order.
    pub fn get_clusters(&self) -> Vec<Vec<FeatureVec>> {
        self.clusters
            .read()
            .unwrap()
            .iter()
            .map(|c| c.members().to_vec())
            .collect()
    }

    /// Number of clusters currently in the list.
    pub fn num_clusters(&self) -> usize {
        self.clusters.read().unwrap().len()
    }

    /// Whether the set holds no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.read().unwrap().is_empty()
    }

    /// Total vectors absorbed across all clusters.
    pub fn total_member_count(&self) -> usize {
        self.clusters
            .read()
            .unwrap()
            .iter()
            .map(Cluster::total_member_count)
            .sum()
    }

    /// The settings this set was minted with.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}

/// Disjoint-set over original cluster indices. Tracks which survivor each
/// absorbed cluster transitively merged into during finalize.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
        }
    }

    /// Find the root of `x`, compressing the path behind it.
    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Point `absorbed` (a root at merge time) at `survivor`'s root.
    fn union_into(&mut self, absorbed: usize, survivor: usize) {
        let root = self.find(survivor);
        let absorbed_root = self.find(absorbed);
        self.parent[absorbed_root] = root;
    }
}
