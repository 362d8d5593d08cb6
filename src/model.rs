//! Scene objects.
//!
//! A [`Model`] is a mesh placed in world space (the transform current when
//! the object was added is already baked into its vertices) together with
//! the material it is shaded with.

use crate::light::Material;
use crate::mesh::Mesh;
use crate::polygon::Polygon;

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    mesh: Mesh,
    material: Material,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
        }
    }

    /// Get the model name (the mesh path it was loaded from).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// World-space polygons, one per face.
    pub fn polygons(&self) -> impl Iterator<Item = Polygon<4>> + '_ {
        self.mesh.polygons()
    }
}
