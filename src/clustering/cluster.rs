//! A single cluster: running centroid plus the member vectors behind it.

use serde::Serialize;

use crate::vector::{add_assign, blend_assign, cosine_similarity, FeatureVec};

/// One cluster's running centroid and append-only member list.
///
/// The centroid always reflects the configured combination rule applied to
/// every member added so far: a plain running sum when `history_weight` is
/// 0.0, otherwise `centroid = w * centroid + (1 - w) * v` on each addition.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    /// Representative point for similarity comparisons.
    centroid: FeatureVec,
    /// Every vector absorbed into this cluster, in arrival order.
    members: Vec<FeatureVec>,
    /// Centroid update rule weight (copied from the owning set's config).
    history_weight: f32,
}

impl Cluster {
    /// Create a singleton cluster seeded with its first vector.
    pub fn new(seed: FeatureVec, history_weight: f32) -> Self {
        Self {
            centroid: seed.clone(),
            members: vec![seed],
            history_weight,
        }
    }

    /// Cosine similarity of the centroid against a candidate vector.
    pub fn compare_with_vector(&self, v: &[f32]) -> f32 {
        cosine_similarity(&self.centroid, v)
    }

    /// Cosine similarity between this cluster's centroid and another's.
    pub fn cluster_similarity(&self, other: &Cluster) -> f32 {
        cosine_similarity(&self.centroid, &other.centroid)
    }

    /// Absorb a vector: update the centroid per the configured rule, then
    /// append the vector to the member list.
    pub fn add_vector(&mut self, v: FeatureVec) {
        if self.history_weight == 0.0 {
            add_assign(&mut self.centroid, &v);
        } else {
            blend_assign(&mut self.centroid, &v, self.history_weight);
        }
        self.members.push(v);
    }

    /// Absorb another cluster: take over its members and combine centroids
    /// consistently with the configured rule. Under the running-sum rule the
    /// centroids add elementwise, so the result is exactly the sum over the
    /// merged member union; under EWMA the other centroid is blended in as
    /// one aggregate contribution.
    pub fn add_cluster(&mut self, other: &Cluster) {
        if self.history_weight == 0.0 {
            add_assign(&mut self.centroid, &other.centroid);
        } else {
            blend_assign(&mut self.centroid, &other.centroid, self.history_weight);
        }
        self.members.extend(other.members.iter().cloned());
    }

    /// Number of vectors absorbed so far.
    pub fn total_member_count(&self) -> usize {
        self.members.len()
    }

    /// The current centroid.
    pub fn centroid(&self) -> &[f32] {
        &self.centroid
    }

    /// The member vectors, in arrival order.
    pub fn members(&self) -> &[FeatureVec] {
        &self.members
    }
}
