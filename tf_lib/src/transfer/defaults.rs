//! # Default values
//!
//! Tuning constants of the curve engine and initial values of new points.

use nalgebra::{vector, Vector3};

// Tables
pub const TEXTURE_RESOLUTION: usize = 256;
/// Smallest usable function array, sampling needs two texels
pub const MIN_RESOLUTION: usize = 2;

// Bezier sampling
/// Samples per unit of x distance between two neighbouring points
pub const BEZIER_STEPS: f32 = 1024.0;
pub const BEZIER_MIN_STEPS_BETWEEN_POINTS: usize = 64;

// Editing
pub const CLAMP_CONTROL_POINTS: bool = false;
/// Distance of freshly created control handles from their point (x axis)
pub const CONTROL_POINT_DISTANCE: f32 = 0.025;
/// How far the original point moves when duplicated
pub const DUPLICATE_OFFSET: f32 = 0.01;

// Hit testing
pub const POINT_SCALE: f32 = 0.05;
pub const INTERSECTION_BIAS: f32 = 0.2;

// Point values
pub const COLOR: Vector3<f32> = vector![0.5, 0.5, 0.5];
pub const AMBIENT_MULTIPLIER: f32 = 0.5;
pub const SPECULAR_MULTIPLIER: f32 = 0.5;
pub const SPECULAR_SATURATION: f32 = 0.5;
pub const SPECULAR_POWER: f32 = 16.0;
pub const GRADIENT_ALPHA_MULTIPLIER: f32 = 0.0;
pub const FRESNEL_ALPHA_MULTIPLIER: f32 = 0.0;
pub const REFLECTION_COLOR_MULTIPLIER: f32 = 0.0;
pub const EMISSION_COLOR_MULTIPLIER: f32 = 0.0;

pub const SPECULAR_POWER_MIN: f32 = 0.5;
pub const SPECULAR_POWER_MAX: f32 = 128.0;

// Registry
pub const NEW_CURVE_NAME: &str = "newTf";
