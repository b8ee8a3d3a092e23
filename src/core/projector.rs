use serde::Serialize;

use crate::core::Point;

/// Floor applied to the projective denominator.
pub const DENOM_EPS: f64 = 1e-9;

/// How the latent scalar `w` is seeded from the normalized geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeMode {
    /// Rotate the x axis into the latent axis: `w = x*sin(theta)`.
    /// The companion coordinate `x' = x*cos(theta)` carries no statistics.
    Xw,
    /// Proximity to the `x = max(x)` boundary plane.
    Fixed,
    /// Proximity to the far corner `(max(x), max(y), 0)`.
    Corner,
}

impl ProbeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "xw" => Some(Self::Xw),
            "fixed" => Some(Self::Fixed),
            "corner" => Some(Self::Corner),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xw => "xw",
            Self::Fixed => "fixed",
            Self::Corner => "corner",
        }
    }
}

impl std::fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-combination reductions over one normalized cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ChannelStats {
    pub w_min: f64,
    pub w_max: f64,
    pub w_max_abs: f64,
    pub denom_min_abs: f64,
    pub scale_max_abs: f64,
    pub a_avg: f64,
    pub s_avg: f64,
}

/// Guard against division blow-ups: any `|denom| < eps` is replaced with
/// `sign(denom)*eps`, where zero counts as positive. Non-finite input passes
/// through unchanged.
pub fn safe_denom(denom: f64, eps: f64) -> f64 {
    let sgn = if denom >= 0.0 { 1.0 } else { -1.0 };
    if denom.abs() < eps { sgn * eps } else { denom }
}

/// Deterministic per-point seeds for the latent scalar, one per mode.
/// `fixed` and `corner` map a distance `d` through `1/(1+c*d)`, clipped to
/// `[0, 1]`; `xw` uses x itself.
fn latent_seeds(cloud: &[Point], mode: ProbeMode) -> Vec<f64> {
    match mode {
        ProbeMode::Xw => cloud.iter().map(|p| p[0]).collect(),
        ProbeMode::Fixed => {
            let fx = cloud.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
            cloud
                .iter()
                .map(|p| {
                    let d = (fx - p[0]).abs();
                    (1.0 / (1.0 + 2.0 * d)).clamp(0.0, 1.0)
                })
                .collect()
        }
        ProbeMode::Corner => {
            let cx = cloud.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
            let cy = cloud.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);
            cloud
                .iter()
                .map(|p| {
                    let dx = p[0] - cx;
                    let dy = p[1] - cy;
                    let dz = p[2];
                    let d = (dx * dx + dy * dy + dz * dz).sqrt();
                    (1.0 / (1.0 + 4.0 * d)).clamp(0.0, 1.0)
                })
                .collect()
        }
    }
}

/// Evaluate one parameter combination against a normalized cloud.
///
/// Elementwise: `w = seed*sin(theta)`, `denom = safe_denom(1 + alpha*w)`,
/// `scale = 1/denom`, then the observation-only channels
/// `health = 1/(1+|alpha*w|)`, `a = tanh(k*(2*health - 1))`,
/// `s = tanh(k*(2*clip(|w|,0,1) - 1))`. The channels never feed back into
/// `w` or `denom`.
///
/// Reductions run in a single pass over the points in cloud order, so a row
/// is reproducible bit-for-bit for a given cloud.
pub fn project(cloud: &[Point], mode: ProbeMode, alpha: f64, k: f64, theta: f64) -> ChannelStats {
    let sin_t = theta.sin();
    let w_field: Vec<f64> = latent_seeds(cloud, mode)
        .into_iter()
        .map(|seed| seed * sin_t)
        .collect();

    let mut w_min = f64::INFINITY;
    let mut w_max = f64::NEG_INFINITY;
    let mut w_max_abs = 0.0f64;
    let mut denom_min_abs = f64::INFINITY;
    let mut scale_max_abs = 0.0f64;
    let mut a_sum = 0.0f64;
    let mut s_sum = 0.0f64;

    for &w in &w_field {
        w_min = w_min.min(w);
        w_max = w_max.max(w);
        w_max_abs = w_max_abs.max(w.abs());

        let denom = safe_denom(1.0 + alpha * w, DENOM_EPS);
        denom_min_abs = denom_min_abs.min(denom.abs());
        scale_max_abs = scale_max_abs.max((1.0 / denom).abs());

        let health = 1.0 / (1.0 + (alpha * w).abs());
        let a_raw = 2.0 * health - 1.0;
        let s_raw = w.abs().clamp(0.0, 1.0);
        a_sum += (k * a_raw).tanh();
        s_sum += (k * (2.0 * s_raw - 1.0)).tanh();
    }

    let n = w_field.len() as f64;
    ChannelStats {
        w_min,
        w_max,
        w_max_abs,
        denom_min_abs,
        scale_max_abs,
        a_avg: a_sum / n,
        s_avg: s_sum / n,
    }
}
