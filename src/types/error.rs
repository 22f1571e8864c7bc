//! Error types for the SenseCluster library.

use thiserror::Error;

/// All errors that can occur in the SenseCluster library.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// No cluster set has been created for the given key.
    #[error("No cluster set exists for key {0:?}")]
    UnknownKey(String),

    /// A cluster set's finalize pass was invoked more than once.
    #[error("Cluster set has already been finalized")]
    AlreadyFinalized,

    /// Merge threshold outside the cosine similarity range.
    #[error("Merge threshold out of range [-1.0, 1.0]: {0}")]
    InvalidMergeThreshold(f32),

    /// Drop threshold outside the valid fraction range.
    #[error("Drop threshold out of range [0.0, 1.0): {0}")]
    InvalidDropThreshold(f32),

    /// Maximum cluster count must be positive.
    #[error("Maximum cluster count must be at least 1, got {0}")]
    InvalidMaxClusters(usize),

    /// History weight outside the valid range.
    #[error("History weight out of range [0.0, 1.0): {0}")]
    InvalidHistoryWeight(f32),
}

/// Convenience result type for SenseCluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
