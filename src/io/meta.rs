use serde::Serialize;

use crate::core::projector::ChannelStats;
use crate::core::sweep::PassNorm;

/// Fixed disclaimer attached to every metadata record: the derived channels
/// describe the geometry, they never modify it.
pub const OBSERVATION_NOTE: &str = "Observation-only: balance channels are informational and do \
not alter the input geometry. Not for critical decision-making or safety-critical use.";

#[derive(Clone, Debug, Serialize)]
pub struct PassNormMeta {
    pub pass: u32,
    pub center: [f64; 3],
    pub scale: f64,
}

impl From<&PassNorm> for PassNormMeta {
    fn from(n: &PassNorm) -> Self {
        Self {
            pass: n.pass,
            center: n.center,
            scale: n.scale,
        }
    }
}

/// Write-once record of one sweep run, serialized as JSON next to the
/// result tables.
#[derive(Clone, Debug, Serialize)]
pub struct RunMeta {
    pub input: String,
    pub points_used_per_pass: usize,
    pub passes: u32,
    pub modes: Vec<String>,
    pub alpha: Vec<f64>,
    pub k: Vec<f64>,
    pub theta_steps: u32,
    pub theta_min: f64,
    pub theta_max: f64,
    pub normalization_per_pass: Vec<PassNormMeta>,
    pub elapsed_sec: f64,
    pub note: &'static str,
}

/// Record of a single-combination sanity probe.
#[derive(Clone, Debug, Serialize)]
pub struct ProbeReport {
    pub input: String,
    pub points_used: usize,
    pub mode: String,
    pub alpha: f64,
    pub k: f64,
    pub theta: f64,
    pub center: [f64; 3],
    pub scale: f64,
    #[serde(flatten)]
    pub stats: ChannelStats,
    pub elapsed_sec: f64,
    pub note: &'static str,
}

/// Elapsed seconds rounded to the millisecond, as recorded in metadata.
pub fn round_elapsed(sec: f64) -> f64 {
    (sec * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_meta_serializes_with_note() {
        let meta = RunMeta {
            input: "cloud.xyz".to_string(),
            points_used_per_pass: 1000,
            passes: 2,
            modes: vec!["xw".to_string()],
            alpha: vec![0.65],
            k: vec![2.2],
            theta_steps: 4,
            theta_min: 0.0,
            theta_max: 1.0,
            normalization_per_pass: vec![PassNormMeta {
                pass: 0,
                center: [0.5, -0.25, 12.0],
                scale: 3.5,
            }],
            elapsed_sec: 0.123,
            note: OBSERVATION_NOTE,
        };
        let json = serde_json::to_string_pretty(&meta).unwrap();
        assert!(json.contains("\"points_used_per_pass\": 1000"));
        assert!(json.contains("Observation-only"));
        assert!(json.contains("\"scale\": 3.5"));
    }

    #[test]
    fn probe_report_flattens_stats() {
        let report = ProbeReport {
            input: "cloud.xyz".to_string(),
            points_used: 64,
            mode: "xw".to_string(),
            alpha: 0.65,
            k: 2.2,
            theta: 0.5,
            center: [0.0; 3],
            scale: 1.0,
            stats: ChannelStats {
                denom_min_abs: 0.9,
                ..ChannelStats::default()
            },
            elapsed_sec: 0.01,
            note: OBSERVATION_NOTE,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"denom_min_abs\":0.9"));
        assert!(json.contains("\"w_min\":0.0"));
    }

    #[test]
    fn elapsed_rounds_to_millis() {
        assert_eq!(round_elapsed(1.23456), 1.235);
        assert_eq!(round_elapsed(0.0004), 0.0);
    }
}
