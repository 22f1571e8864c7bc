//! Feature vector primitives used by all cluster/centroid comparisons.

/// Feature vector (dimension chosen by the producer, e.g. 128 or 384).
pub type FeatureVec = Vec<f32>;

/// Compute cosine similarity between two vectors.
///
/// Truncates to the shorter length; returns 0.0 when either vector has
/// zero magnitude. The result is clamped to [-1.0, 1.0].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for i in 0..a.len().min(b.len()) {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Elementwise accumulate: `dst[i] += src[i]`.
///
/// Extra trailing elements on either side are left untouched.
pub fn add_assign(dst: &mut [f32], src: &[f32]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d += s;
    }
}

/// Exponentially weighted blend: `dst[i] = weight * dst[i] + (1 - weight) * src[i]`.
pub fn blend_assign(dst: &mut [f32], src: &[f32], weight: f32) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = weight * *d + (1.0 - weight) * s;
    }
}
