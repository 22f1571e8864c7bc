//! SenseCluster — streaming per-key clustering of high-dimensional vectors.
//!
//! Incrementally groups feature vectors (e.g. per-word usage/context
//! vectors) into an a-priori-unknown number of clusters, per independent
//! key, without buffering the full dataset. Vectors stream in through a
//! single-pass nearest-centroid heuristic; a later, explicit finalize pass
//! consolidates near-duplicate clusters created along the way.
//!
//! This is not a globally-optimal clusterer: it is an approximate streaming
//! heuristic with a bounded consolidation step, not an iterative
//! converge-to-fixed-point k-means.
//!
//! ```
//! use sense_cluster::{ClusterKeyRegistry, ClusterSetFactory};
//!
//! let registry = ClusterKeyRegistry::new(ClusterSetFactory::default());
//! registry.add_vector("cat", vec![1.0, 0.0]);
//! registry.add_vector("cat", vec![0.0, 1.0]);
//! assert_eq!(registry.get_num_clusters("cat"), 2);
//! ```

pub mod clustering;
pub mod registry;
pub mod types;
pub mod vector;

// Re-export commonly used types at the crate root
pub use clustering::{Cluster, ClusterSet, ClusterSetFactory};
pub use registry::ClusterKeyRegistry;
pub use types::{
    ClusterConfig, ClusterError, ClusterResult, DEFAULT_DROP_THRESHOLD, DEFAULT_HISTORY_WEIGHT,
    DEFAULT_MAX_CLUSTERS, DEFAULT_MERGE_THRESHOLD,
};
pub use vector::{cosine_similarity, FeatureVec};
