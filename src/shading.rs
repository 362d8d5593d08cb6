//! Flat Phong shading.
//!
//! One colour per polygon, evaluated at its first vertex in world space:
//!
//! ```text
//! I = KaIa * O + sum over lights of Ip * (Kd * (N·L) * O + Ks * (N·H)^n)
//! ```
//!
//! with `L` and `V` the unit vectors from the vertex to the light and to the
//! eye, and `H = normalize(L + V)`. Lights behind the surface (`N·L <= 0`)
//! contribute nothing.
//!
//! Front faces wind clockwise seen from outside (the winding back-face
//! culling keeps), so `N` is the negated right-hand normal of the vertex
//! order.

use log::trace;

use crate::colors::Color;
use crate::light::{Ambient, Material, PointLight};
use crate::math::{Vec3, Vec4};
use crate::polygon::Polygon;

/// Everything shading needs besides the polygon and its material.
#[derive(Debug, Clone, Copy)]
pub struct Illumination<'a> {
    pub ambient: Ambient,
    pub lights: &'a [PointLight],
    pub eye: Vec4,
}

impl Illumination<'_> {
    /// Flat colour of `polygon`, or `None` if it has no normal (all vertices
    /// collinear).
    pub fn shade(&self, polygon: &Polygon<4>, material: &Material) -> Option<Color> {
        let Some(normal) = polygon.normal().map(|n| -n) else {
            trace!("skipping polygon without a normal: {:?}", polygon.vertices);
            return None;
        };
        let vertex = polygon.vertices[0].xyz();
        let view = (self.eye.xyz() - vertex).normalize();

        let ambient = self.ambient.0 * material.color;
        let color = self
            .lights
            .iter()
            .filter_map(|light| reflected(light, normal, vertex, view, material))
            .fold(ambient, |acc, c| acc + c);
        Some(color)
    }
}

/// Diffuse plus specular contribution of one light, `None` when the light
/// is behind the surface or sits on the vertex.
fn reflected(
    light: &PointLight,
    normal: Vec3,
    vertex: Vec3,
    view: Option<Vec3>,
    material: &Material,
) -> Option<Color> {
    let to_light = (light.position.xyz() - vertex).normalize()?;
    let n_dot_l = normal.dot(to_light);
    if n_dot_l <= 0.0 {
        return None;
    }

    let diffuse = material.color * (material.kd * n_dot_l);
    let highlight = view
        .and_then(|v| (to_light + v).normalize())
        .map(|half| normal.dot(half).max(0.0).powf(material.shininess))
        .unwrap_or(0.0);
    let specular = Color::WHITE * (material.ks * highlight);

    Some(light.intensity * (diffuse + specular))
}
