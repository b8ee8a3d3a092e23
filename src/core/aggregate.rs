use std::collections::HashMap;

use crate::core::projector::ProbeMode;
use crate::core::sweep::GridRow;

/// Cross-pass summary for one parameter combination.
///
/// Convention: `*_std` is the sample standard deviation (n-1 denominator);
/// a combination observed in a single pass reports `0.0`, not NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryRow {
    pub mode: ProbeMode,
    pub alpha: f64,
    pub k: f64,
    pub theta: f64,
    pub n_passes: usize,
    pub w_max_abs_mean: f64,
    pub w_max_abs_std: f64,
    pub denom_min_abs_mean: f64,
    pub denom_min_abs_std: f64,
    pub scale_max_abs_mean: f64,
    pub scale_max_abs_std: f64,
    pub a_avg_mean: f64,
    pub a_avg_std: f64,
    pub s_avg_mean: f64,
    pub s_avg_std: f64,
}

pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let var = values
        .iter()
        .map(|v| {
            let d = *v - mean;
            d * d
        })
        .sum::<f64>()
        / (values.len() as f64 - 1.0);
    (mean, var.max(0.0).sqrt())
}

// Group keys compare the parameter floats bitwise. Every row's floats come
// from the one shared grid, so keys are identical across passes without any
// rounding tolerance.
type ComboKey = (ProbeMode, u64, u64, u64);

fn key_of(row: &GridRow) -> ComboKey {
    (
        row.mode,
        row.alpha.to_bits(),
        row.k.to_bits(),
        row.theta.to_bits(),
    )
}

/// Reduce per-pass rows into one summary row per distinct combination.
/// Output follows first-appearance order, which for sweep output is grid
/// order.
pub fn aggregate(rows: &[GridRow]) -> Vec<SummaryRow> {
    let mut groups: HashMap<ComboKey, Vec<&GridRow>> = HashMap::new();
    let mut order: Vec<ComboKey> = Vec::new();
    for row in rows {
        let key = key_of(row);
        let entry = groups.entry(key).or_default();
        if entry.is_empty() {
            order.push(key);
        }
        entry.push(row);
    }

    let mut out = Vec::with_capacity(order.len());
    for key in order {
        let group = &groups[&key];
        let first = group[0];
        let collect = |f: fn(&GridRow) -> f64| -> Vec<f64> { group.iter().map(|r| f(r)).collect() };
        let (w_max_abs_mean, w_max_abs_std) = mean_std(&collect(|r| r.stats.w_max_abs));
        let (denom_min_abs_mean, denom_min_abs_std) =
            mean_std(&collect(|r| r.stats.denom_min_abs));
        let (scale_max_abs_mean, scale_max_abs_std) =
            mean_std(&collect(|r| r.stats.scale_max_abs));
        let (a_avg_mean, a_avg_std) = mean_std(&collect(|r| r.stats.a_avg));
        let (s_avg_mean, s_avg_std) = mean_std(&collect(|r| r.stats.s_avg));
        out.push(SummaryRow {
            mode: first.mode,
            alpha: first.alpha,
            k: first.k,
            theta: first.theta,
            n_passes: group.len(),
            w_max_abs_mean,
            w_max_abs_std,
            denom_min_abs_mean,
            denom_min_abs_std,
            scale_max_abs_mean,
            scale_max_abs_std,
            a_avg_mean,
            a_avg_std,
            s_avg_mean,
            s_avg_std,
        });
    }
    out
}
