use crate::core::projector::ProbeMode;

/// Invalid grid configuration, rejected before any sampling work.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    ZeroThetaSteps,
    EmptyThetaRange { theta_min: f64, theta_max: f64 },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroThetaSteps => write!(f, "theta_steps must be > 0"),
            Self::EmptyThetaRange {
                theta_min,
                theta_max,
            } => write!(
                f,
                "theta_max must be > theta_min (got [{theta_min}, {theta_max}))"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// One point of the parameter grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Combo {
    pub mode: ProbeMode,
    pub alpha: f64,
    pub k: f64,
    pub theta: f64,
}

/// `steps` evenly spaced samples over the half-open interval
/// `[theta_min, theta_max)`; `theta_max` itself is excluded.
pub fn build_thetas(steps: u32, theta_min: f64, theta_max: f64) -> Result<Vec<f64>, GridError> {
    if steps == 0 {
        return Err(GridError::ZeroThetaSteps);
    }
    if theta_max <= theta_min {
        return Err(GridError::EmptyThetaRange {
            theta_min,
            theta_max,
        });
    }
    let step = (theta_max - theta_min) / steps as f64;
    Ok((0..steps).map(|i| theta_min + i as f64 * step).collect())
}

/// Full cartesian product in mode, alpha, k, theta order. The ordering only
/// fixes output row order; combinations are independent.
pub fn combinations(
    modes: &[ProbeMode],
    alphas: &[f64],
    ks: &[f64],
    thetas: &[f64],
) -> Vec<Combo> {
    let mut out = Vec::with_capacity(modes.len() * alphas.len() * ks.len() * thetas.len());
    for &mode in modes {
        for &alpha in alphas {
            for &k in ks {
                for &theta in thetas {
                    out.push(Combo {
                        mode,
                        alpha,
                        k,
                        theta,
                    });
                }
            }
        }
    }
    out
}
