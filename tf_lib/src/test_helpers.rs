//! Module with helper functions
//! Saves repetition in unit, integration tests and benchmarks

use std::path::PathBuf;

use nalgebra::{point, vector};

use crate::transfer::{Curve, CurveOptions, PointHandle, PointValue};

/// Default ramp with a red bump in the middle and a linked point
///
/// Returns curve and handles of the two normal points.
pub fn bump_curve(options: CurveOptions) -> (Curve, PointHandle, PointHandle) {
    let mut curve = Curve::new("bump", options);

    let peak = curve.add(point![0.4, 0.9]);
    let mut red = PointValue::with_color(vector![1.0, 0.0, 0.0]);
    red.specular_power = 64.0;
    red.emission_color_multiplier = 0.5;
    curve.set_value(peak, red).unwrap();

    let valley = curve.add(point![0.7, 0.2]);
    curve.set_linked(valley, true).unwrap();
    curve.set_right_control(valley, point![0.8, 0.3]).unwrap();

    (curve, peak, valley)
}

/// Fresh empty directory under system temp dir
pub fn temp_library_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tf_lib_{}_{}", tag, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
