//! Polygon meshes and mesh file loading.
//!
//! Two formats are understood:
//! - `.asc`: a `vertex_count face_count` header line, then one `x y z` line
//!   per vertex, then one `n i1 ... in` line per face with 1-based indices.
//! - `.obj`: Wavefront OBJ through `tobj`, faces kept as authored.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::MeshError;
use crate::math::{Mat4, Vec4};
use crate::polygon::Polygon;

/// A face as 0-based indices into the mesh's vertex list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

/// Vertices and faces of one object. Every face index is valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<Vec4>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh, checking that every face has at least three vertices
    /// and only references existing ones.
    pub fn new(vertices: Vec<Vec4>, faces: Vec<Face>) -> Result<Self, MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            if face.indices.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: face_index + 1,
                    arity: face.indices.len(),
                });
            }
            if let Some(&bad) = face.indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_index + 1,
                    index: bad + 1,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Applies `m` to every vertex. Faces are unchanged.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| *m * v).collect(),
            faces: self.faces.clone(),
        }
    }

    /// One polygon per face, vertices in face order.
    pub fn polygons(&self) -> impl Iterator<Item = Polygon<4>> + '_ {
        self.faces
            .iter()
            .map(|face| Polygon::new(face.indices.iter().map(|&i| self.vertices[i]).collect()))
    }

    /// Loads a mesh file, picking the format from the extension.
    pub fn load(path: &Path) -> Result<Self, MeshError> {
        let is_obj = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if is_obj {
            return Self::from_obj(path);
        }
        let source = std::fs::read_to_string(path).map_err(|source| MeshError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_asc(&source, path)
    }

    /// Parses `.asc` mesh text. `path` is only used in error messages.
    pub fn parse_asc(source: &str, path: &Path) -> Result<Self, MeshError> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let truncated = |what, expected, found| MeshError::Truncated {
            path: path.to_path_buf(),
            what,
            expected,
            found,
        };

        let (line_no, header) = lines.next().ok_or_else(|| truncated("header lines", 1, 0))?;
        let counts = parse_numbers::<usize>(header, line_no, path)?;
        let &[vertex_count, face_count] = counts.as_slice() else {
            return Err(parse_error(
                path,
                line_no,
                "expected `<vertex count> <face count>`".to_string(),
            ));
        };

        // every vertex and face needs its own line
        let line_count = source.lines().count();
        let mut vertices = Vec::with_capacity(vertex_count.min(line_count));
        for found in 0..vertex_count {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| truncated("vertices", vertex_count, found))?;
            let coords = parse_numbers::<f64>(line, line_no, path)?;
            let &[x, y, z] = coords.as_slice() else {
                return Err(parse_error(path, line_no, "expected `x y z`".to_string()));
            };
            vertices.push(Vec4::point(x, y, z));
        }

        let mut faces = Vec::with_capacity(face_count.min(line_count));
        for found in 0..face_count {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| truncated("faces", face_count, found))?;
            let numbers = parse_numbers::<usize>(line, line_no, path)?;
            let Some((&arity, indices)) = numbers.split_first() else {
                return Err(parse_error(path, line_no, "empty face".to_string()));
            };
            if indices.len() < arity {
                return Err(parse_error(
                    path,
                    line_no,
                    format!("face lists {} of {} vertex indices", indices.len(), arity),
                ));
            }
            let indices = &indices[..arity];
            if let Some(&zero) = indices.iter().find(|&&i| i == 0) {
                return Err(MeshError::IndexOutOfRange {
                    face: found + 1,
                    index: zero,
                    vertex_count,
                });
            }
            faces.push(Face::new(indices.iter().map(|&i| i - 1).collect()));
        }

        if let Some((line_no, _)) = lines.next() {
            warn!(
                "{}: ignoring trailing content from line {}",
                path.display(),
                line_no
            );
        }

        let mesh = Self::new(vertices, faces)?;
        debug!(
            "loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Loads every model in an OBJ file into a single mesh.
    pub fn from_obj(path: &Path) -> Result<Self, MeshError> {
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: false,
            ..Default::default()
        };
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|e| MeshError::Obj {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec4::point(p[0] as f64, p[1] as f64, p[2] as f64)),
            );

            // tobj leaves face_arities empty when every face is a triangle
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };
            let mut next = 0;
            for arity in arities {
                let indices = mesh.indices[next..next + arity]
                    .iter()
                    .map(|&i| base + i as usize)
                    .collect();
                faces.push(Face::new(indices));
                next += arity;
            }
        }

        let mesh = Self::new(vertices, faces)?;
        debug!(
            "loaded {} ({} models): {} vertices, {} faces",
            path.display(),
            models.len(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }
}

fn parse_error(path: &Path, line: usize, message: String) -> MeshError {
    MeshError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}

fn parse_numbers<T: std::str::FromStr>(line: &str, line_no: usize, path: &Path) -> Result<Vec<T>, MeshError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| parse_error(path, line_no, format!("`{token}` is not a valid number")))
        })
        .collect()
}

/// Resolves mesh paths named by scene scripts.
pub trait MeshSource {
    fn load(&self, path: &str) -> Result<Mesh, MeshError>;
}

/// Loads meshes from disk.
///
/// A relative path is tried as given first, then under each search
/// directory in order.
#[derive(Debug, Clone, Default)]
pub struct FileMeshSource {
    search_dirs: Vec<PathBuf>,
}

impl FileMeshSource {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let direct = PathBuf::from(path);
        if direct.is_absolute() || direct.exists() {
            return direct;
        }
        self.search_dirs
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .unwrap_or(direct)
    }
}

impl MeshSource for FileMeshSource {
    fn load(&self, path: &str) -> Result<Mesh, MeshError> {
        Mesh::load(&self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    const TRIANGLE_AND_QUAD: &str = "
4 2
0 0 0
1 0 0
1 1 0
0 1 0
3 1 2 3
4 1 2 3 4
";

    fn parse(source: &str) -> Result<Mesh, MeshError> {
        Mesh::parse_asc(source, Path::new("test.asc"))
    }

    #[test]
    fn parses_vertices_and_faces() {
        let mesh = parse(TRIANGLE_AND_QUAD).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces()[0], Face::new(vec![0, 1, 2]));
        assert_eq!(mesh.faces()[1], Face::new(vec![0, 1, 2, 3]));
        assert_eq!(mesh.vertices()[2], Vec4::point(1.0, 1.0, 0.0));
    }

    #[test]
    fn polygons_follow_face_order() {
        let mesh = parse(TRIANGLE_AND_QUAD).unwrap();
        let polygons: Vec<_> = mesh.polygons().collect();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].vertices[3], Vec4::point(0.0, 1.0, 0.0));
    }

    #[test]
    fn transformed_moves_vertices_only() {
        let mesh = parse(TRIANGLE_AND_QUAD).unwrap();
        let tm = Transform::new().translate(0.0, 0.0, 5.0);
        let moved = mesh.transformed(tm.matrix());
        assert_eq!(moved.vertices()[1], Vec4::point(1.0, 0.0, 5.0));
        assert_eq!(moved.faces(), mesh.faces());
    }

    #[test]
    fn truncated_vertex_list_is_reported() {
        let err = parse("3 1\n0 0 0\n1 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Truncated { what: "vertices", expected: 3, found: 2, .. }
        ));
    }

    #[test]
    fn truncated_face_list_is_reported() {
        let err = parse("3 2\n0 0 0\n1 0 0\n0 1 0\n3 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Truncated { what: "faces", expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let err = parse("3 1\n0 0 0\n1 0 0\n0 1 0\n3 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { face: 1, index: 4, vertex_count: 3 }
        ));

        let err = parse("3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn malformed_lines_report_line_numbers() {
        let err = parse("1 0\n0 zero 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));

        let err = parse("2 1\n0 0 0\n1 1 1\n2 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::FaceTooSmall { face: 1, arity: 2 }));
    }

    #[test]
    fn huge_header_counts_are_truncation_errors() {
        let err = parse("18446744073709551615 1\n0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Truncated { what: "vertices", expected: usize::MAX, found: 1, .. }
        ));

        let err = parse("1 1000000000000\n0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Truncated { what: "faces", expected: 1_000_000_000_000, found: 0, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = FileMeshSource::new(vec![PathBuf::from("does-not-exist")]);
        assert!(matches!(source.load("nope.asc"), Err(MeshError::Io { .. })));
    }

    #[test]
    fn search_dirs_resolve_relative_paths() {
        let dir = std::env::temp_dir().join(format!("scanline3d-mesh-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("tri.asc"), "3 1\n0 0 0\n1 0 0\n0 1 0\n3 1 2 3\n").unwrap();

        let mesh = FileMeshSource::new(vec![dir.clone()]).load("tri.asc").unwrap();
        assert_eq!(mesh.face_count(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
