use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Input point cloud (ASCII XYZ: one `x y z` per line)
    #[arg(value_name = "CLOUD_PATH")]
    pub cloud_path: String,

    /// Output directory for result tables and run metadata
    #[arg(long, default_value = "sweep_out")]
    pub outdir: String,

    /// Path to config TOML
    #[arg(long, default_value = "sweep.toml")]
    pub config: String,

    /// Base RNG seed; pass p draws with seed + p (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Points sampled per pass (overrides config)
    #[arg(long)]
    pub points: Option<usize>,

    /// Number of independent passes (overrides config)
    #[arg(long)]
    pub passes: Option<u32>,

    /// Projection modes: xw, fixed, corner (overrides config)
    #[arg(long, num_args = 1..)]
    pub modes: Option<Vec<String>>,

    /// Alpha values to sweep (overrides config)
    #[arg(long, num_args = 1..)]
    pub alpha: Option<Vec<f64>>,

    /// Channel gain values to sweep (overrides config)
    #[arg(long, num_args = 1..)]
    pub k: Option<Vec<f64>>,

    /// Number of theta samples over [theta_min, theta_max) (overrides config)
    #[arg(long)]
    pub theta_steps: Option<u32>,

    #[arg(long)]
    pub theta_min: Option<f64>,

    #[arg(long)]
    pub theta_max: Option<f64>,

    /// Worker threads for combination evaluation; 1 = serial (overrides config)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Skip the sweep: evaluate a single combination at this theta
    /// (first configured mode/alpha/k) and write probe_stats.json
    #[arg(long, value_name = "THETA")]
    pub probe: Option<f64>,
}
