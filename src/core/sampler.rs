use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::core::Point;

/// Indices of a deterministic subsample: `n` of `n_total`, without replacement.
///
/// The generator is keyed by `seed` alone, so identical `(seed, n_total, n)`
/// always yields the identical index sequence. Requesting `n >= n_total`
/// returns every index in original order and consumes no randomness.
pub fn sample_indices(n_total: usize, n: usize, seed: u64) -> Vec<usize> {
    if n >= n_total {
        return (0..n_total).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, n_total, n).into_vec()
}

/// Materialize the subsample selected by [`sample_indices`].
/// Output order is selection order, not spatial order.
pub fn sample_cloud(points: &[Point], n: usize, seed: u64) -> Vec<Point> {
    sample_indices(points.len(), n, seed)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
