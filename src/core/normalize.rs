use crate::core::Point;

/// A centered and scaled point set, with the parameters that produced it.
///
/// Invariant: `max ||p||` over the points is 1 after scaling, unless the
/// degenerate fallback (`scale = 1.0`) applied.
#[derive(Clone, Debug)]
pub struct NormalizedCloud {
    pub points: Vec<Point>,
    pub center: [f64; 3],
    pub scale: f64,
}

/// Center on the component-wise mean, then divide by the maximum deviation
/// norm so every point lands inside the unit ball.
///
/// A non-finite or non-positive scale (all points coincident, or corrupted
/// input) falls back to `scale = 1.0`, leaving the points centered but
/// unscaled.
pub fn normalize(points: &[Point]) -> NormalizedCloud {
    let mut center = [0.0f64; 3];
    if !points.is_empty() {
        for p in points {
            center[0] += p[0];
            center[1] += p[1];
            center[2] += p[2];
        }
        let n = points.len() as f64;
        center[0] /= n;
        center[1] /= n;
        center[2] /= n;
    }

    let mut deviations = Vec::with_capacity(points.len());
    let mut scale = 0.0f64;
    for p in points {
        let d = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
        let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        if norm > scale || !norm.is_finite() {
            scale = norm;
        }
        deviations.push(d);
    }
    if !scale.is_finite() || scale <= 0.0 {
        scale = 1.0;
    }

    for d in &mut deviations {
        d[0] /= scale;
        d[1] /= scale;
        d[2] /= scale;
    }

    NormalizedCloud {
        points: deviations,
        center,
        scale,
    }
}
