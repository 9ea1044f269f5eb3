use std::{cmp::Ordering, fmt};

use nalgebra::{vector, Point2, Vector2};

use super::{defaults, PointValue};

/// Stable identity of a control point inside one curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointHandle(pub u32);

impl fmt::Display for PointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// First and last point may not be moved in x direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Fixed at `x = 0`, has no left control handle
    LeftEnd,
    /// Fixed at `x = 1`, has no right control handle
    RightEnd,
    Normal,
}

/// One control point of the curve
///
/// Holds position, Bezier handles and material value.
/// Range checks against the curve domain are done by the owning curve,
/// the point only keeps its handles on the correct side of itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    handle: PointHandle,
    location: Location,
    position: Point2<f32>,
    left_control: Point2<f32>,
    right_control: Point2<f32>,
    linked: bool,
    value: PointValue,
}

impl ControlPoint {
    /// Construct new point with default value
    ///
    /// Control handles start at a fixed distance on both sides, on the same height.
    pub fn new(handle: PointHandle, location: Location, position: Point2<f32>) -> ControlPoint {
        let offset = vector![defaults::CONTROL_POINT_DISTANCE, 0.0];
        let mut cp = ControlPoint {
            handle,
            location,
            position,
            left_control: position,
            right_control: position,
            linked: false,
            value: PointValue::default(),
        };
        cp.set_left_control(position - offset);
        cp.set_right_control(position + offset);
        cp
    }

    pub fn handle(&self) -> PointHandle {
        self.handle
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn left_control(&self) -> Point2<f32> {
        self.left_control
    }

    pub fn right_control(&self) -> Point2<f32> {
        self.right_control
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn value(&self) -> &PointValue {
        &self.value
    }

    pub fn is_end(&self) -> bool {
        self.location != Location::Normal
    }

    /// Copy of this point under a new handle, always a normal point
    ///
    /// Position, handles and value are copied, the copy starts unlinked.
    pub fn copy_as(&self, handle: PointHandle) -> ControlPoint {
        ControlPoint {
            handle,
            location: Location::Normal,
            linked: false,
            ..self.clone()
        }
    }

    /// Move the point itself, handles stay where they are
    pub fn set_position(&mut self, position: Point2<f32>) {
        self.position = position;
    }

    pub fn set_value(&mut self, value: PointValue) {
        self.value = value;
    }

    /// Handle x never crosses the point
    pub fn set_left_control(&mut self, control: Point2<f32>) {
        self.left_control = control;
        if self.left_control.x > self.position.x {
            self.left_control.x = self.position.x;
        }

        if self.linked {
            self.right_control = self.mirror(self.left_control);
        }
    }

    /// Handle x never crosses the point
    pub fn set_right_control(&mut self, control: Point2<f32>) {
        self.right_control = control;
        if self.right_control.x < self.position.x {
            self.right_control.x = self.position.x;
        }

        if self.linked {
            self.left_control = self.mirror(self.right_control);
        }
    }

    /// Flip link state, returns new state
    ///
    /// End points can not be linked.
    pub fn toggle_linked(&mut self) -> bool {
        let linked = !self.linked;
        self.set_linked(linked);
        self.linked
    }

    /// Set link state, returns resulting state
    pub fn set_linked(&mut self, linked: bool) -> bool {
        if self.location != Location::Normal {
            self.linked = false;
            return false;
        }

        let was_linked = self.linked;
        self.linked = linked;
        if linked && !was_linked {
            self.symmetrize_controls();
        }
        self.linked
    }

    pub fn intersects_point(&self, coord: &Point2<f32>, scale: f32, aspect_ratio: f32) -> bool {
        intersect(coord, &self.position, hit_size(scale, aspect_ratio))
    }

    pub fn intersects_left_control(
        &self,
        coord: &Point2<f32>,
        scale: f32,
        aspect_ratio: f32,
    ) -> bool {
        self.location != Location::LeftEnd
            && intersect(coord, &self.left_control, hit_size(scale, aspect_ratio))
    }

    pub fn intersects_right_control(
        &self,
        coord: &Point2<f32>,
        scale: f32,
        aspect_ratio: f32,
    ) -> bool {
        self.location != Location::RightEnd
            && intersect(coord, &self.right_control, hit_size(scale, aspect_ratio))
    }

    /// Order by x coordinate only
    pub fn cmp_x(&self, other: &ControlPoint) -> Ordering {
        self.position
            .x
            .partial_cmp(&other.position.x)
            .unwrap_or(Ordering::Equal)
    }

    fn mirror(&self, p: Point2<f32>) -> Point2<f32> {
        self.position + (self.position - p)
    }

    // Meet halfway between left handle and mirrored right handle,
    // setter then derives the right handle
    fn symmetrize_controls(&mut self) {
        let delta = self.left_control - self.mirror(self.right_control);
        self.set_left_control(self.left_control - delta * 0.5);
    }
}

/// Half extent of hit box for given zoom and viewport aspect
fn hit_size(scale: f32, aspect_ratio: f32) -> Vector2<f32> {
    vector![
        defaults::POINT_SCALE * scale / aspect_ratio,
        defaults::POINT_SCALE * scale
    ]
}

fn intersect(coord: &Point2<f32>, target: &Point2<f32>, size: Vector2<f32>) -> bool {
    let dist = (coord - target).abs();
    let reach = size * (1.0 + defaults::INTERSECTION_BIAS);
    dist.x <= reach.x && dist.y <= reach.y
}
