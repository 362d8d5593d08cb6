//! Lighting types for the renderer.

use log::warn;

use crate::colors::Color;
use crate::math::Vec4;

/// A point light with per-channel intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Intensity per channel (`Ipr`, `Ipg`, `Ipb`).
    pub intensity: Color,
    pub position: Vec4,
}

impl PointLight {
    pub fn new(intensity: Color, position: Vec4) -> Self {
        Self {
            intensity,
            position,
        }
    }
}

/// Ambient term `Ka * Ia` per channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ambient(pub Color);

/// Surface reflectance of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Object colour (`Or`, `Og`, `Ob`).
    pub color: Color,
    /// Diffuse coefficient.
    pub kd: f64,
    /// Specular coefficient.
    pub ks: f64,
    /// Specular exponent.
    pub shininess: f64,
}

impl Material {
    pub fn new(color: Color, kd: f64, ks: f64, shininess: f64) -> Self {
        Self {
            color,
            kd,
            ks,
            shininess,
        }
    }
}

impl Default for Material {
    /// Plain white, fully diffuse, no highlight.
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0, 0.0, 1.0)
    }
}

/// Stores `light` under the 1-based `index`.
///
/// An index past the end appends instead, so `light 5 ...` on a scene with
/// two lights becomes the third light.
pub fn place_light(lights: &mut Vec<PointLight>, index: usize, light: PointLight) {
    match index.checked_sub(1).filter(|&i| i < lights.len()) {
        Some(i) => lights[i] = light,
        None => {
            if index != lights.len() + 1 {
                warn!(
                    "light index {} is past the end of {} lights, appending as light {}",
                    index,
                    lights.len(),
                    lights.len() + 1
                );
            }
            lights.push(light);
        }
    }
}
