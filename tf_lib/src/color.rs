//! Four channel texel type
//!
//! All tables produced by a curve pack four floats per sample, even when
//! the channels are material multipliers rather than a color.

use nalgebra::{vector, Vector3, Vector4};

pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Color with separate opacity
pub fn from_rgb(rgb: Vector3<f32>, a: f32) -> RGBA {
    vector![rgb.x, rgb.y, rgb.z, a]
}

/// Color part of texel
pub fn rgb(texel: &RGBA) -> Vector3<f32> {
    texel.xyz()
}
