use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::core::grid::{GridError, build_thetas};
use crate::core::projector::ProbeMode;
use crate::core::sweep::SweepPlan;

/// Sweep configuration as read from TOML, before validation. CLI flags
/// override individual fields; `resolve` turns the result into a runnable
/// plan or fails fast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "SweepConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "SweepConfig::default_points")]
    pub points: usize,
    #[serde(default = "SweepConfig::default_passes")]
    pub passes: u32,
    #[serde(default = "SweepConfig::default_modes")]
    pub modes: Vec<String>,
    #[serde(default = "SweepConfig::default_alpha")]
    pub alpha: Vec<f64>,
    #[serde(default = "SweepConfig::default_k")]
    pub k: Vec<f64>,
    #[serde(default = "SweepConfig::default_theta_steps")]
    pub theta_steps: u32,
    #[serde(default = "SweepConfig::default_theta_min")]
    pub theta_min: f64,
    #[serde(default = "SweepConfig::default_theta_max")]
    pub theta_max: f64,
    #[serde(default = "SweepConfig::default_threads")]
    pub threads: usize,
}

impl SweepConfig {
    fn default_seed() -> u64 {
        7
    }
    fn default_points() -> usize {
        2_000_000
    }
    fn default_passes() -> u32 {
        3
    }
    fn default_modes() -> Vec<String> {
        vec!["xw".to_string(), "fixed".to_string(), "corner".to_string()]
    }
    fn default_alpha() -> Vec<f64> {
        vec![0.65]
    }
    fn default_k() -> Vec<f64> {
        vec![2.2]
    }
    fn default_theta_steps() -> u32 {
        64
    }
    fn default_theta_min() -> f64 {
        0.0
    }
    fn default_theta_max() -> f64 {
        std::f64::consts::TAU
    }
    fn default_threads() -> usize {
        1
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            points: Self::default_points(),
            passes: Self::default_passes(),
            modes: Self::default_modes(),
            alpha: Self::default_alpha(),
            k: Self::default_k(),
            theta_steps: Self::default_theta_steps(),
            theta_min: Self::default_theta_min(),
            theta_max: Self::default_theta_max(),
            threads: Self::default_threads(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownMode(String),
    Grid(GridError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMode(s) => {
                write!(f, "unknown mode `{s}` (expected xw, fixed or corner)")
            }
            Self::Grid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl SweepConfig {
    /// Read a TOML config, falling back to defaults when the file does not
    /// exist or fails to parse.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            return Self::default();
        }
        match fs::read_to_string(path_obj) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("Failed to read config {path}: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// CLI flags take precedence over the file.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(points) = args.points {
            self.points = points;
        }
        if let Some(passes) = args.passes {
            self.passes = passes;
        }
        if let Some(modes) = &args.modes {
            self.modes = modes.clone();
        }
        if let Some(alpha) = &args.alpha {
            self.alpha = alpha.clone();
        }
        if let Some(k) = &args.k {
            self.k = k.clone();
        }
        if let Some(steps) = args.theta_steps {
            self.theta_steps = steps;
        }
        if let Some(min) = args.theta_min {
            self.theta_min = min;
        }
        if let Some(max) = args.theta_max {
            self.theta_max = max;
        }
        if let Some(threads) = args.threads {
            self.threads = threads;
        }
    }

    /// Validate and expand into a runnable plan. This is the fail-fast
    /// gate: an unknown mode or an invalid theta grid is rejected here,
    /// before any file or sampling work.
    pub fn resolve(&self) -> Result<SweepPlan, ConfigError> {
        let modes = self
            .modes
            .iter()
            .map(|s| ProbeMode::parse(s).ok_or_else(|| ConfigError::UnknownMode(s.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let thetas = build_thetas(self.theta_steps, self.theta_min, self.theta_max)?;
        Ok(SweepPlan {
            seed: self.seed,
            points_per_pass: self.points,
            passes: self.passes,
            modes,
            alphas: self.alpha.clone(),
            ks: self.k.clone(),
            thetas,
            threads: self.threads.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let cfg = SweepConfig::default();
        let plan = cfg.resolve().unwrap();
        assert_eq!(plan.seed, 7);
        assert_eq!(plan.passes, 3);
        assert_eq!(plan.modes.len(), 3);
        assert_eq!(plan.thetas.len(), 64);
        assert_eq!(plan.thetas[0], 0.0);
        let last = plan.thetas[63];
        assert!(last < std::f64::consts::TAU, "theta_max is excluded");
    }

    #[test]
    fn unknown_mode_is_fatal() {
        let cfg = SweepConfig {
            modes: vec!["xw".to_string(), "tilt".to_string()],
            ..SweepConfig::default()
        };
        assert_eq!(
            cfg.resolve(),
            Err(ConfigError::UnknownMode("tilt".to_string()))
        );
    }

    #[test]
    fn bad_theta_grid_is_fatal() {
        let cfg = SweepConfig {
            theta_steps: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(cfg.resolve(), Err(ConfigError::Grid(_))));

        let cfg = SweepConfig {
            theta_min: 2.0,
            theta_max: 2.0,
            ..SweepConfig::default()
        };
        assert!(matches!(cfg.resolve(), Err(ConfigError::Grid(_))));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: SweepConfig = toml::from_str("passes = 5\nalpha = [0.1, 0.2]\n").unwrap();
        assert_eq!(cfg.passes, 5);
        assert_eq!(cfg.alpha, vec![0.1, 0.2]);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.theta_steps, 64);
    }

    #[test]
    fn toml_round_trip() {
        let cfg = SweepConfig {
            passes: 2,
            threads: 8,
            ..SweepConfig::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: SweepConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.passes, 2);
        assert_eq!(back.threads, 8);
        assert_eq!(back.modes, cfg.modes);
    }
}
