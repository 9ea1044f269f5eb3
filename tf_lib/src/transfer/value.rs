use nalgebra::Vector3;

use super::defaults;

/// Material payload of one control point
///
/// Fields are grouped the same way as the three function tables:
/// color (alpha comes from the curve shape), ambient/specular and advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointValue {
    /// Each component in `[0;1]`
    pub color: Vector3<f32>,

    pub ambient_multiplier: f32,
    pub specular_multiplier: f32,
    pub specular_saturation: f32,
    /// In `[0.5;128]`
    pub specular_power: f32,

    pub gradient_alpha_multiplier: f32,
    pub fresnel_alpha_multiplier: f32,
    pub reflection_color_multiplier: f32,
    pub emission_color_multiplier: f32,
}

impl PointValue {
    pub fn new() -> PointValue {
        PointValue {
            color: defaults::COLOR,
            ambient_multiplier: defaults::AMBIENT_MULTIPLIER,
            specular_multiplier: defaults::SPECULAR_MULTIPLIER,
            specular_saturation: defaults::SPECULAR_SATURATION,
            specular_power: defaults::SPECULAR_POWER,
            gradient_alpha_multiplier: defaults::GRADIENT_ALPHA_MULTIPLIER,
            fresnel_alpha_multiplier: defaults::FRESNEL_ALPHA_MULTIPLIER,
            reflection_color_multiplier: defaults::REFLECTION_COLOR_MULTIPLIER,
            emission_color_multiplier: defaults::EMISSION_COLOR_MULTIPLIER,
        }
    }

    /// Value with default material and given color
    pub fn with_color(color: Vector3<f32>) -> PointValue {
        PointValue {
            color,
            ..PointValue::new()
        }
    }

    /// Restore all fields to defaults
    pub fn reset(&mut self) {
        *self = PointValue::new();
    }

    /// Copy of value forced into documented ranges
    pub fn clamped(&self) -> PointValue {
        let unit = |v: f32| v.clamp(0.0, 1.0);
        PointValue {
            color: self.color.map(unit),
            ambient_multiplier: unit(self.ambient_multiplier),
            specular_multiplier: unit(self.specular_multiplier),
            specular_saturation: unit(self.specular_saturation),
            specular_power: self
                .specular_power
                .clamp(defaults::SPECULAR_POWER_MIN, defaults::SPECULAR_POWER_MAX),
            gradient_alpha_multiplier: unit(self.gradient_alpha_multiplier),
            fresnel_alpha_multiplier: unit(self.fresnel_alpha_multiplier),
            reflection_color_multiplier: unit(self.reflection_color_multiplier),
            emission_color_multiplier: unit(self.emission_color_multiplier),
        }
    }

    /// Linear blend, `t = 0` gives `self`
    pub fn lerp(&self, other: &PointValue, t: f32) -> PointValue {
        let mix = |a: f32, b: f32| (1.0 - t) * a + t * b;
        PointValue {
            color: self.color.lerp(&other.color, t),
            ambient_multiplier: mix(self.ambient_multiplier, other.ambient_multiplier),
            specular_multiplier: mix(self.specular_multiplier, other.specular_multiplier),
            specular_saturation: mix(self.specular_saturation, other.specular_saturation),
            specular_power: mix(self.specular_power, other.specular_power),
            gradient_alpha_multiplier: mix(
                self.gradient_alpha_multiplier,
                other.gradient_alpha_multiplier,
            ),
            fresnel_alpha_multiplier: mix(
                self.fresnel_alpha_multiplier,
                other.fresnel_alpha_multiplier,
            ),
            reflection_color_multiplier: mix(
                self.reflection_color_multiplier,
                other.reflection_color_multiplier,
            ),
            emission_color_multiplier: mix(
                self.emission_color_multiplier,
                other.emission_color_multiplier,
            ),
        }
    }
}

impl Default for PointValue {
    fn default() -> Self {
        Self::new()
    }
}
