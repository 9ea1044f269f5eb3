//! Sampling of the cubic Bezier spline through control points

use super::{defaults, ControlPoint};

/// One sample of the spline polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub x: f32,
    pub y: f32,
    /// Position in point index space, `1.5` lies halfway between points 1 and 2.
    /// Blended with the same weights as `x` and `y`.
    pub index: f32,
}

/// Bernstein weights of cubic Bezier at `t`
pub fn cubic_weights(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t]
}

/// Number of samples between two points `dx` apart
pub fn segment_steps(dx: f32) -> usize {
    let steps = (dx.max(0.0) * defaults::BEZIER_STEPS) as usize;
    steps.max(defaults::BEZIER_MIN_STEPS_BETWEEN_POINTS)
}

/// Sample the whole spline into one polyline
///
/// Segment between points `i` and `i+1` uses
/// (`i.position`, `i.right_control`, `i+1.left_control`, `i+1.position`).
/// Points must be sorted by x, the polyline then spans `[first.x; last.x]`.
pub fn build_polyline(points: &[ControlPoint]) -> Vec<CurveSample> {
    let step_counts: Vec<usize> = points
        .windows(2)
        .map(|pair| segment_steps(pair[1].position().x - pair[0].position().x))
        .collect();

    let mut polyline = Vec::with_capacity(step_counts.iter().sum());

    for (i, (pair, &steps)) in points.windows(2).zip(step_counts.iter()).enumerate() {
        let (left, right) = (&pair[0], &pair[1]);
        let p0 = left.position();
        let p1 = left.right_control();
        let p2 = right.left_control();
        let p3 = right.position();
        let left_index = i as f32;
        let right_index = (i + 1) as f32;

        for j in 0..steps {
            let t = j as f32 / (steps - 1) as f32;
            let [a, b, c, d] = cubic_weights(t);

            polyline.push(CurveSample {
                x: a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                y: a * p0.y + b * p1.y + c * p2.y + d * p3.y,
                index: a * left_index + b * left_index + c * right_index + d * right_index,
            });
        }
    }

    polyline
}
