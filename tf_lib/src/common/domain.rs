use nalgebra::{point, Point2, Vector2};

/// Axis aligned rectangle in curve space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lower: Point2<f32>,
    pub upper: Point2<f32>,
}

impl Domain {
    pub fn new(lower: Point2<f32>, upper: Point2<f32>) -> Domain {
        Domain { lower, upper }
    }

    /// Normalized intensity domain, `[0;1]` on both axes
    pub fn unit() -> Domain {
        Domain {
            lower: point![0.0, 0.0],
            upper: point![1.0, 1.0],
        }
    }

    pub fn dims(&self) -> Vector2<f32> {
        self.upper - self.lower
    }

    /// Inclusive test, borders belong to the domain
    pub fn contains(&self, pos: &Point2<f32>) -> bool {
        pos.x >= self.lower.x
            && pos.x <= self.upper.x
            && pos.y >= self.lower.y
            && pos.y <= self.upper.y
    }

    /// Clamp `pos` into the domain
    ///
    /// Returns clamped position and whether any coordinate had to change.
    /// NaN coordinates end up on the lower bound.
    pub fn clamp(&self, pos: Point2<f32>) -> (Point2<f32>, bool) {
        let clamped = point![
            clamp_axis(pos.x, self.lower.x, self.upper.x),
            clamp_axis(pos.y, self.lower.y, self.upper.y)
        ];
        (clamped, clamped != pos)
    }

    /// Replace non finite coordinates with the lower bound, finite ones are kept
    pub fn finite(&self, pos: Point2<f32>) -> Point2<f32> {
        let axis = |v: f32, lower: f32| if v.is_finite() { v } else { lower };
        point![axis(pos.x, self.lower.x), axis(pos.y, self.lower.y)]
    }
}

fn clamp_axis(v: f32, lower: f32, upper: f32) -> f32 {
    if v.is_nan() {
        lower
    } else {
        v.clamp(lower, upper)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::unit()
    }
}
