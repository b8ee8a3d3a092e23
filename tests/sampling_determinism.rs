use plumbline::core::sampler::{sample_cloud, sample_indices};

#[test]
fn repeated_runs_return_identical_sequences() {
    for seed in [0u64, 7, 1 << 40] {
        let first = sample_indices(50_000, 1_000, seed);
        let second = sample_indices(50_000, 1_000, seed);
        assert_eq!(first, second, "seed {seed} must reproduce exactly");
    }
}

#[test]
fn pass_style_seed_offsets_give_distinct_samples() {
    let base = 7u64;
    let draws: Vec<Vec<usize>> = (0..3)
        .map(|pass| sample_indices(10_000, 500, base + pass))
        .collect();
    assert_ne!(draws[0], draws[1]);
    assert_ne!(draws[1], draws[2]);
    assert_ne!(draws[0], draws[2]);
}

#[test]
fn full_cloud_request_keeps_file_order() {
    let points: Vec<[f64; 3]> = (0..32).map(|i| [i as f64, 0.0, 0.0]).collect();
    let sampled = sample_cloud(&points, 32, 123);
    assert_eq!(sampled, points);
    let oversampled = sample_cloud(&points, 1_000, 456);
    assert_eq!(oversampled, points, "n >= N ignores the seed entirely");
}
