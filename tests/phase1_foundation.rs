//! Phase 1 tests: Vector primitives, cluster entity, and config validation.

use sense_cluster::clustering::Cluster;
use sense_cluster::vector::{add_assign, blend_assign, cosine_similarity};
use sense_cluster::{ClusterConfig, ClusterError, ClusterSetFactory};

// ==================== Helpers ====================

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "expected {} to be close to {}", b, a);
}

fn assert_vec_close(a: &[f32], b: &[f32]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_close(*x, *y);
    }
}

// ==================== Vector Primitive Tests ====================

#[test]
fn test_cosine_parallel() {
    assert_close(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
    assert_close(cosine_similarity(&[1.0, 0.0], &[3.0, 0.0]), 1.0);
}

#[test]
fn test_cosine_orthogonal() {
    assert_close(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_opposite() {
    assert_close(cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]), -1.0);
}

#[test]
fn test_cosine_zero_vector() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
}

#[test]
fn test_cosine_truncates_to_shorter() {
    // Trailing elements of the longer vector are ignored.
    assert_close(cosine_similarity(&[1.0, 0.0, 5.0], &[2.0, 0.0]), 1.0);
}

#[test]
fn test_cosine_stays_in_range() {
    // Accumulated rounding must never push the result outside [-1, 1].
    let a = vec![0.1f32; 512];
    let b = vec![0.1f32; 512];
    let sim = cosine_similarity(&a, &b);
    assert!((-1.0..=1.0).contains(&sim));
    assert_close(sim, 1.0);
}

#[test]
fn test_add_assign() {
    let mut dst = vec![1.0, 2.0, 3.0];
    add_assign(&mut dst, &[0.5, 0.5, 0.5]);
    assert_vec_close(&dst, &[1.5, 2.5, 3.5]);
}

#[test]
fn test_blend_assign() {
    let mut dst = vec![1.0, 0.0];
    blend_assign(&mut dst, &[0.0, 1.0], 0.5);
    assert_vec_close(&dst, &[0.5, 0.5]);

    // weight 0.9 keeps most of the history
    let mut dst = vec![1.0, 0.0];
    blend_assign(&mut dst, &[0.0, 1.0], 0.9);
    assert_vec_close(&dst, &[0.9, 0.1]);
}

// ==================== Cluster Entity Tests ====================

#[test]
fn test_cluster_seeded_with_first_vector() {
    let cluster = Cluster::new(vec![1.0, 2.0], 0.0);
    assert_vec_close(cluster.centroid(), &[1.0, 2.0]);
    assert_eq!(cluster.total_member_count(), 1);
    assert_eq!(cluster.members(), &[vec![1.0, 2.0]]);
}

#[test]
fn test_cluster_running_sum_centroid() {
    let mut cluster = Cluster::new(vec![1.0, 0.0], 0.0);
    cluster.add_vector(vec![1.0, 0.0]);
    assert_vec_close(cluster.centroid(), &[2.0, 0.0]);
    cluster.add_vector(vec![0.0, 3.0]);
    assert_vec_close(cluster.centroid(), &[2.0, 3.0]);
    assert_eq!(cluster.total_member_count(), 3);
}

#[test]
fn test_cluster_ewma_centroid() {
    let mut cluster = Cluster::new(vec![1.0, 0.0], 0.5);
    cluster.add_vector(vec![0.0, 1.0]);
    assert_vec_close(cluster.centroid(), &[0.5, 0.5]);
    cluster.add_vector(vec![0.5, 0.5]);
    assert_vec_close(cluster.centroid(), &[0.5, 0.5]);
}

#[test]
fn test_cluster_members_keep_arrival_order() {
    let mut cluster = Cluster::new(vec![1.0, 0.0], 0.0);
    cluster.add_vector(vec![2.0, 0.0]);
    cluster.add_vector(vec![3.0, 0.0]);
    assert_eq!(
        cluster.members(),
        &[vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]]
    );
}

#[test]
fn test_compare_with_vector() {
    let cluster = Cluster::new(vec![1.0, 0.0], 0.0);
    assert_close(cluster.compare_with_vector(&[4.0, 0.0]), 1.0);
    assert_close(cluster.compare_with_vector(&[0.0, 1.0]), 0.0);
}

#[test]
fn test_cluster_similarity() {
    let a = Cluster::new(vec![1.0, 0.0], 0.0);
    let b = Cluster::new(vec![0.0, 2.0], 0.0);
    let c = Cluster::new(vec![5.0, 0.0], 0.0);
    assert_close(a.cluster_similarity(&b), 0.0);
    assert_close(a.cluster_similarity(&c), 1.0);
}

#[test]
fn test_add_cluster_running_sum() {
    let mut a = Cluster::new(vec![1.0, 0.0], 0.0);
    a.add_vector(vec![1.0, 0.0]);
    let mut b = Cluster::new(vec![0.0, 1.0], 0.0);
    b.add_vector(vec![0.0, 1.0]);

    a.add_cluster(&b);

    // Centroids add elementwise, so the result is exactly the running sum
    // over the merged member union.
    assert_vec_close(a.centroid(), &[2.0, 2.0]);
    assert_eq!(a.total_member_count(), 4);
    assert_eq!(
        a.members(),
        &[
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0]
        ]
    );
    // The absorbed cluster is untouched.
    assert_eq!(b.total_member_count(), 2);
}

#[test]
fn test_add_cluster_ewma() {
    let mut a = Cluster::new(vec![1.0, 0.0], 0.5);
    let b = Cluster::new(vec![0.0, 1.0], 0.5);
    a.add_cluster(&b);
    assert_vec_close(a.centroid(), &[0.5, 0.5]);
    assert_eq!(a.total_member_count(), 2);
}

// ==================== Config Validation Tests ====================

#[test]
fn test_config_defaults() {
    let config = ClusterConfig::default();
    assert_eq!(config.merge_threshold, 1.0);
    assert_eq!(config.drop_threshold, 0.0);
    assert_eq!(config.max_clusters, 2);
    assert_eq!(config.history_weight, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_builder_setters() {
    let config = ClusterConfig::default()
        .with_merge_threshold(0.8)
        .with_drop_threshold(0.1)
        .with_max_clusters(16)
        .with_history_weight(0.25);
    assert_eq!(config.merge_threshold, 0.8);
    assert_eq!(config.drop_threshold, 0.1);
    assert_eq!(config.max_clusters, 16);
    assert_eq!(config.history_weight, 0.25);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_bad_merge_threshold() {
    let config = ClusterConfig::default().with_merge_threshold(1.5);
    assert!(matches!(
        config.validate(),
        Err(ClusterError::InvalidMergeThreshold(_))
    ));
    let config = ClusterConfig::default().with_merge_threshold(-1.1);
    assert!(matches!(
        config.validate(),
        Err(ClusterError::InvalidMergeThreshold(_))
    ));
}

#[test]
fn test_config_rejects_bad_drop_threshold() {
    for bad in [-0.1, 1.0, 2.0] {
        let config = ClusterConfig::default().with_drop_threshold(bad);
        assert!(matches!(
            config.validate(),
            Err(ClusterError::InvalidDropThreshold(_))
        ));
    }
}

#[test]
fn test_config_rejects_zero_max_clusters() {
    let config = ClusterConfig::default().with_max_clusters(0);
    assert!(matches!(
        config.validate(),
        Err(ClusterError::InvalidMaxClusters(0))
    ));
}

#[test]
fn test_config_rejects_bad_history_weight() {
    for bad in [-0.5, 1.0, 1.5] {
        let config = ClusterConfig::default().with_history_weight(bad);
        assert!(matches!(
            config.validate(),
            Err(ClusterError::InvalidHistoryWeight(_))
        ));
    }
}

#[test]
fn test_factory_fails_fast_on_invalid_config() {
    // Validation happens at factory construction, before any set is minted.
    let result = ClusterSetFactory::new(ClusterConfig::default().with_max_clusters(0));
    assert!(matches!(result, Err(ClusterError::InvalidMaxClusters(0))));
}

#[test]
fn test_factory_mints_independent_sets() {
    let factory = ClusterSetFactory::default();
    let a = factory.new_clustering_instance();
    let b = factory.new_clustering_instance();
    a.add_vector(vec![1.0, 0.0]);
    assert_eq!(a.num_clusters(), 1);
    assert_eq!(b.num_clusters(), 0);
}
