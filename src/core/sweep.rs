use tracing::{debug, info};

use crate::core::Point;
use crate::core::grid::{Combo, combinations};
use crate::core::normalize::normalize;
use crate::core::projector::{ChannelStats, ProbeMode, project};
use crate::core::sampler::sample_cloud;

/// A validated sweep: every field is ready to run.
/// Produced by `config::SweepConfig::resolve`, which owns the fail-fast checks.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPlan {
    pub seed: u64,
    pub points_per_pass: usize,
    pub passes: u32,
    pub modes: Vec<ProbeMode>,
    pub alphas: Vec<f64>,
    pub ks: Vec<f64>,
    pub thetas: Vec<f64>,
    /// Worker threads for combination evaluation; 1 keeps the serial path.
    pub threads: usize,
}

/// One output row: a parameter combination evaluated against one pass's cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRow {
    pub pass: u32,
    pub mode: ProbeMode,
    pub alpha: f64,
    pub k: f64,
    pub theta: f64,
    pub stats: ChannelStats,
}

/// Normalization provenance for one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassNorm {
    pub pass: u32,
    pub center: [f64; 3],
    pub scale: f64,
}

#[derive(Clone, Debug)]
pub struct SweepOutcome {
    pub rows: Vec<GridRow>,
    pub norm_meta: Vec<PassNorm>,
}

/// Run the full grid: for each pass, subsample with `seed + pass`, normalize,
/// then evaluate every parameter combination against the pass's cloud.
///
/// Rows come out pass-major, then in grid order (mode, alpha, k, theta), and
/// are numerically identical whether combinations run serially or on worker
/// threads.
pub fn run_sweep(points: &[Point], plan: &SweepPlan) -> SweepOutcome {
    let combos = combinations(&plan.modes, &plan.alphas, &plan.ks, &plan.thetas);
    let mut rows = Vec::with_capacity(combos.len() * plan.passes as usize);
    let mut norm_meta = Vec::with_capacity(plan.passes as usize);

    for pass in 0..plan.passes {
        let pass_seed = plan.seed.wrapping_add(pass as u64);
        let sampled = sample_cloud(points, plan.points_per_pass, pass_seed);
        let cloud = normalize(&sampled);
        info!(
            pass,
            points = cloud.points.len(),
            scale = cloud.scale,
            "pass sampled and normalized"
        );
        norm_meta.push(PassNorm {
            pass,
            center: cloud.center,
            scale: cloud.scale,
        });

        let stats = eval_combos(&cloud.points, &combos, plan.threads);
        for (combo, st) in combos.iter().zip(stats) {
            rows.push(GridRow {
                pass,
                mode: combo.mode,
                alpha: combo.alpha,
                k: combo.k,
                theta: combo.theta,
                stats: st,
            });
        }
        debug!(pass, rows = combos.len(), "pass evaluated");
    }

    SweepOutcome { rows, norm_meta }
}

/// Evaluate all combinations against one read-only cloud.
///
/// Each combination writes only its own output slot, so chunks can run on
/// worker threads; results are re-assembled in grid order regardless of
/// completion order.
fn eval_combos(cloud: &[Point], combos: &[Combo], threads: usize) -> Vec<ChannelStats> {
    if threads <= 1 || combos.len() <= 1 {
        return combos
            .iter()
            .map(|c| project(cloud, c.mode, c.alpha, c.k, c.theta))
            .collect();
    }

    let chunk_len = combos.len().div_ceil(threads);
    let (tx, rx) = crossbeam_channel::unbounded::<(usize, Vec<ChannelStats>)>();
    std::thread::scope(|scope| {
        for (chunk_idx, chunk) in combos.chunks(chunk_len).enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                let stats: Vec<ChannelStats> = chunk
                    .iter()
                    .map(|c| project(cloud, c.mode, c.alpha, c.k, c.theta))
                    .collect();
                let _ = tx.send((chunk_idx * chunk_len, stats));
            });
        }
    });
    drop(tx);

    let mut out = vec![ChannelStats::default(); combos.len()];
    for (base, stats) in rx.iter() {
        for (offset, st) in stats.into_iter().enumerate() {
            out[base + offset] = st;
        }
    }
    out
}

/// Single-combination sanity run: one deterministic subsample, normalized,
/// projected once. Returns the pass provenance alongside the stats so a
/// report can carry both.
pub fn probe(
    points: &[Point],
    n: usize,
    seed: u64,
    mode: ProbeMode,
    alpha: f64,
    k: f64,
    theta: f64,
) -> (PassNorm, ChannelStats) {
    let sampled = sample_cloud(points, n, seed);
    let cloud = normalize(&sampled);
    let norm = PassNorm {
        pass: 0,
        center: cloud.center,
        scale: cloud.scale,
    };
    (norm, project(&cloud.points, mode, alpha, k, theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn test_cloud(n: usize) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(99);
        (0..n)
            .map(|_| {
                [
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(0.0..30.0),
                ]
            })
            .collect()
    }

    fn small_plan() -> SweepPlan {
        SweepPlan {
            seed: 7,
            points_per_pass: 64,
            passes: 2,
            modes: vec![ProbeMode::Xw, ProbeMode::Corner],
            alphas: vec![0.65],
            ks: vec![2.2],
            thetas: vec![0.0, 0.5, 1.0],
            threads: 1,
        }
    }

    #[test]
    fn row_count_and_order() {
        let points = test_cloud(256);
        let plan = small_plan();
        let outcome = run_sweep(&points, &plan);
        assert_eq!(outcome.rows.len(), 2 * 2 * 1 * 1 * 3);
        assert_eq!(outcome.norm_meta.len(), 2);
        // pass-major, theta fastest
        assert_eq!(outcome.rows[0].pass, 0);
        assert_eq!(outcome.rows[0].theta, 0.0);
        assert_eq!(outcome.rows[1].theta, 0.5);
        assert_eq!(outcome.rows[3].mode, ProbeMode::Corner);
        assert_eq!(outcome.rows[6].pass, 1);
    }

    #[test]
    fn threaded_matches_serial_bit_for_bit() {
        let points = test_cloud(256);
        let mut plan = small_plan();
        let serial = run_sweep(&points, &plan);
        plan.threads = 4;
        let threaded = run_sweep(&points, &plan);
        assert_eq!(serial.rows, threaded.rows);
    }

    #[test]
    fn passes_use_distinct_subsamples() {
        let points = test_cloud(256);
        let plan = small_plan();
        let outcome = run_sweep(&points, &plan);
        let a = outcome.norm_meta[0];
        let b = outcome.norm_meta[1];
        assert!(
            a.center != b.center || a.scale != b.scale,
            "distinct pass seeds should pick distinct subsamples"
        );
    }

    #[test]
    fn sweep_is_reproducible() {
        let points = test_cloud(256);
        let plan = small_plan();
        let first = run_sweep(&points, &plan);
        let second = run_sweep(&points, &plan);
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.norm_meta, second.norm_meta);
    }

    #[test]
    fn probe_matches_single_pass_row() {
        let points = test_cloud(256);
        let (norm, stats) = probe(&points, 64, 7, ProbeMode::Xw, 0.65, 2.2, 0.5);
        let plan = SweepPlan {
            thetas: vec![0.5],
            modes: vec![ProbeMode::Xw],
            passes: 1,
            ..small_plan()
        };
        let outcome = run_sweep(&points, &plan);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].stats, stats);
        assert_eq!(outcome.norm_meta[0], norm);
    }
}
