use std::error::Error;
use std::fs::{create_dir_all, write};
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plumbline::cli::Args;
use plumbline::config::SweepConfig;
use plumbline::core::aggregate::aggregate;
use plumbline::core::sweep::{SweepPlan, probe, run_sweep};
use plumbline::io::meta::{
    OBSERVATION_NOTE, PassNormMeta, ProbeReport, RunMeta, round_elapsed,
};
use plumbline::io::table::{agg_csv, results_csv};
use plumbline::io::xyz::read_xyz;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = SweepConfig::load_or_default(&args.config);
    cfg.apply_overrides(&args);
    // Fail fast: config problems abort before the cloud is even opened.
    let plan = cfg.resolve()?;

    let t0 = Instant::now();
    let points = read_xyz(Path::new(&args.cloud_path)).map_err(std::io::Error::other)?;
    info!(points = points.len(), input = %args.cloud_path, "cloud loaded");

    let outdir = Path::new(&args.outdir);
    create_dir_all(outdir)?;

    if let Some(theta) = args.probe {
        return run_probe(&args, &cfg, &plan, &points, theta, t0);
    }

    let outcome = run_sweep(&points, &plan);
    let summary = aggregate(&outcome.rows);

    let results_path = outdir.join("grid_results.csv");
    write(&results_path, results_csv(&outcome.rows))?;
    let agg_path = outdir.join("grid_agg.csv");
    write(&agg_path, agg_csv(&summary))?;

    let meta = RunMeta {
        input: args.cloud_path.clone(),
        points_used_per_pass: cfg.points,
        passes: cfg.passes,
        modes: plan.modes.iter().map(|m| m.to_string()).collect(),
        alpha: cfg.alpha.clone(),
        k: cfg.k.clone(),
        theta_steps: cfg.theta_steps,
        theta_min: cfg.theta_min,
        theta_max: cfg.theta_max,
        normalization_per_pass: outcome.norm_meta.iter().map(PassNormMeta::from).collect(),
        elapsed_sec: round_elapsed(t0.elapsed().as_secs_f64()),
        note: OBSERVATION_NOTE,
    };
    let meta_path = outdir.join("run_meta.json");
    write(&meta_path, serde_json::to_string_pretty(&meta)?)?;

    println!("DONE");
    println!("Wrote: {}", results_path.display());
    println!("Wrote: {}", agg_path.display());
    println!("Wrote: {}", meta_path.display());
    println!("Elapsed sec: {}", meta.elapsed_sec);
    Ok(())
}

/// Single-combination sanity run: first configured mode/alpha/k at the
/// requested theta, one pass, one JSON record.
fn run_probe(
    args: &Args,
    cfg: &SweepConfig,
    plan: &SweepPlan,
    points: &[[f64; 3]],
    theta: f64,
    t0: Instant,
) -> Result<(), Box<dyn Error>> {
    let Some(&mode) = plan.modes.first() else {
        return Err(std::io::Error::other("probe needs at least one configured mode").into());
    };
    let alpha = plan.alphas.first().copied().unwrap_or(0.0);
    let k = plan.ks.first().copied().unwrap_or(0.0);
    let (norm, stats) = probe(points, cfg.points, cfg.seed, mode, alpha, k, theta);

    let report = ProbeReport {
        input: args.cloud_path.clone(),
        points_used: cfg.points.min(points.len()),
        mode: mode.to_string(),
        alpha,
        k,
        theta,
        center: norm.center,
        scale: norm.scale,
        stats,
        elapsed_sec: round_elapsed(t0.elapsed().as_secs_f64()),
        note: OBSERVATION_NOTE,
    };
    let path = Path::new(&args.outdir).join("probe_stats.json");
    write(&path, serde_json::to_string_pretty(&report)?)?;
    println!("DONE");
    println!("Wrote: {}", path.display());
    Ok(())
}
