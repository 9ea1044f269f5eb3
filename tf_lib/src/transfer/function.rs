//! Sampling of the spline into function arrays

use nalgebra::vector;

use crate::color::{self, RGBA};

use super::{bezier::CurveSample, ControlPoint, PointValue};

/// The three packed function tables of a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Color and opacity
    ColorAlpha,
    /// Ambient multiplier, specular multiplier, specular saturation, specular power
    AmbientSpecular,
    /// Gradient alpha, fresnel alpha, reflection color and emission color multipliers
    Advanced,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::ColorAlpha, Table::AmbientSpecular, Table::Advanced];

    pub fn id(self) -> u8 {
        match self {
            Table::ColorAlpha => 0,
            Table::AmbientSpecular => 1,
            Table::Advanced => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Table> {
        Table::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// 1D lookup tables, all of the same resolution
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArrays {
    pub color_alpha: Vec<RGBA>,
    pub ambient_specular: Vec<RGBA>,
    pub advanced: Vec<RGBA>,
}

impl FunctionArrays {
    /// All tables zeroed
    pub fn empty(resolution: usize) -> FunctionArrays {
        FunctionArrays {
            color_alpha: vec![color::zero(); resolution],
            ambient_specular: vec![color::zero(); resolution],
            advanced: vec![color::zero(); resolution],
        }
    }

    /// Sample polyline at `resolution` equidistant positions `k / resolution`
    ///
    /// `points` are the points the polyline was built from, sorted by x.
    pub fn sample(
        points: &[ControlPoint],
        polyline: &[CurveSample],
        resolution: usize,
    ) -> FunctionArrays {
        let mut arrays = FunctionArrays {
            color_alpha: Vec::with_capacity(resolution),
            ambient_specular: Vec::with_capacity(resolution),
            advanced: Vec::with_capacity(resolution),
        };

        if points.len() < 2 || polyline.len() < 2 {
            return FunctionArrays::empty(resolution);
        }

        let last_segment = points.len() - 2;
        let mut pos = 1;

        for k in 0..resolution {
            let x = k as f32 / resolution as f32;

            // Scan only forward
            while pos < polyline.len() - 1 && polyline[pos].x <= x {
                pos += 1;
            }
            let left = &polyline[pos - 1];
            let right = &polyline[pos];

            let alpha = ((left.y + right.y) / 2.0).clamp(0.0, 1.0);

            let m = (left.index + right.index) / 2.0;
            let index = (m.max(0.0) as usize).min(last_segment);
            let t = m - index as f32;
            let value = points[index].value().lerp(points[index + 1].value(), t);

            arrays.push(&value, alpha);
        }

        arrays
    }

    pub fn resolution(&self) -> usize {
        self.color_alpha.len()
    }

    pub fn table(&self, table: Table) -> &[RGBA] {
        match table {
            Table::ColorAlpha => &self.color_alpha,
            Table::AmbientSpecular => &self.ambient_specular,
            Table::Advanced => &self.advanced,
        }
    }

    /// Texels of all three tables at index `i`
    ///
    /// Out of range indices read as zero texels.
    pub fn at(&self, i: usize) -> (RGBA, RGBA, RGBA) {
        let texel = |table: &[RGBA]| table.get(i).copied().unwrap_or_else(color::zero);
        (
            texel(&self.color_alpha),
            texel(&self.ambient_specular),
            texel(&self.advanced),
        )
    }

    /// Texel index of normalized position, `floor(x * resolution)`
    pub fn index_of(&self, x: f32) -> usize {
        let res = self.resolution();
        ((x.max(0.0) * res as f32) as usize).min(res.saturating_sub(1))
    }

    /// Recover point value stored at index `i`, alpha is dropped
    pub fn value_at(&self, i: usize) -> PointValue {
        let (ca, amb, adv) = self.at(i);
        PointValue {
            color: color::rgb(&ca),
            ambient_multiplier: amb.x,
            specular_multiplier: amb.y,
            specular_saturation: amb.z,
            specular_power: amb.w,
            gradient_alpha_multiplier: adv.x,
            fresnel_alpha_multiplier: adv.y,
            reflection_color_multiplier: adv.z,
            emission_color_multiplier: adv.w,
        }
    }

    fn push(&mut self, value: &PointValue, alpha: f32) {
        self.color_alpha.push(color::from_rgb(value.color, alpha));
        self.ambient_specular.push(vector![
            value.ambient_multiplier,
            value.specular_multiplier,
            value.specular_saturation,
            value.specular_power
        ]);
        self.advanced.push(vector![
            value.gradient_alpha_multiplier,
            value.fresnel_alpha_multiplier,
            value.reflection_color_multiplier,
            value.emission_color_multiplier
        ]);
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::transfer::{bezier::build_polyline, Location, PointHandle};
    use nalgebra::point;

    fn ramp() -> Vec<ControlPoint> {
        let mut left = ControlPoint::new(PointHandle(0), Location::LeftEnd, point![0.0, 0.0]);
        left.set_value(PointValue::with_color(vector![0.0, 0.0, 0.0]));
        let mut right = ControlPoint::new(PointHandle(1), Location::RightEnd, point![1.0, 1.0]);
        right.set_value(PointValue::with_color(vector![1.0, 1.0, 1.0]));
        vec![left, right]
    }

    #[test]
    fn table_ids() {
        for t in Table::ALL {
            assert_eq!(Table::from_id(t.id()), Some(t));
        }
        assert_eq!(Table::from_id(3), None);
    }

    #[test]
    fn ramp_is_monotonic() {
        let points = ramp();
        let arrays = FunctionArrays::sample(&points, &build_polyline(&points), 64);

        assert_eq!(arrays.resolution(), 64);
        assert!(arrays.color_alpha[0].w < 0.01);
        assert!(arrays.color_alpha[63].w > 0.95);
        for pair in arrays.color_alpha.windows(2) {
            assert!(pair[0].w <= pair[1].w + 1e-6);
            assert!(pair[0].x <= pair[1].x + 1e-6);
        }
    }

    #[test]
    fn material_is_interpolated() {
        let mut points = ramp();
        let mut value = PointValue::new();
        value.specular_power = 100.0;
        points[1].set_value(value);

        let arrays = FunctionArrays::sample(&points, &build_polyline(&points), 32);

        for texel in arrays.ambient_specular.iter() {
            assert!((texel.x - 0.5).abs() < 1e-5);
            assert!(texel.w >= 16.0 - 1e-3 && texel.w <= 100.0 + 1e-3);
        }
        assert!(arrays.ambient_specular[31].w > arrays.ambient_specular[0].w);
    }

    #[test]
    fn index_clamped() {
        let arrays = FunctionArrays::empty(256);
        assert_eq!(arrays.index_of(0.0), 0);
        assert_eq!(arrays.index_of(0.5), 128);
        assert_eq!(arrays.index_of(1.0), 255);
        assert_eq!(arrays.index_of(-1.0), 0);
    }

    #[test]
    fn empty_arrays_read_zero() {
        let arrays = FunctionArrays::empty(0);
        assert_eq!(arrays.index_of(0.7), 0);
        assert_eq!(arrays.at(0), (color::zero(), color::zero(), color::zero()));
        assert_eq!(arrays.value_at(0).specular_power, 0.0);
    }
}
