//! Model geometry: the vertex source of a render object.
//!
//! A [`Model`] is a vertex list plus triangular faces indexing into it, and
//! the base color its triangles are shaded from. Models come from the
//! built-in shapes or from OBJ files (via `tobj`, triangulated on load).

use std::path::Path;

use thiserror::Error;

use crate::colors;
use crate::math::Vec3;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("face {face} references vertex {index}, but the model has {vertex_count} vertices")]
    FaceIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("model '{0}' has no faces")]
    Empty(String),
}

/// A triangle as three 0-based indices into the model's vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

const CUBE_FACES: [Face; 12] = [
    // front
    Face::new(0, 1, 2),
    Face::new(0, 2, 3),
    // right
    Face::new(3, 2, 4),
    Face::new(3, 4, 5),
    // back
    Face::new(5, 4, 6),
    Face::new(5, 6, 7),
    // left
    Face::new(7, 6, 1),
    Face::new(7, 1, 0),
    // top
    Face::new(1, 6, 4),
    Face::new(1, 4, 2),
    // bottom
    Face::new(5, 7, 0),
    Face::new(5, 0, 3),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    color: [u8; 3],
}

impl Model {
    /// Builds a model, checking every face index against the vertex list.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        color: [u8; 3],
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if faces.is_empty() {
            return Err(ModelError::Empty(name));
        }
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(ModelError::FaceIndex {
                    face: face_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self {
            name,
            vertices,
            faces,
            color,
        })
    }

    /// Axis-aligned cube centered on the origin with edge length `size`.
    pub fn cube(size: f32, color: [u8; 3]) -> Self {
        let half = size / 2.0;
        Self {
            name: "cube".to_string(),
            vertices: CUBE_VERTICES.iter().map(|&v| v * half).collect(),
            faces: CUBE_FACES.to_vec(),
            color,
        }
    }

    /// A single triangle.
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3, color: [u8; 3]) -> Self {
        Self {
            name: "triangle".to_string(),
            vertices: vec![a, b, c],
            faces: vec![Face::new(0, 1, 2)],
            color,
        }
    }

    /// Loads every object in an OBJ file into one model.
    pub fn from_obj(path: impl AsRef<Path>, color: [u8; 3]) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let (meshes, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for mesh in meshes.iter().map(|m| &m.mesh) {
            let base = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            faces.extend(mesh.indices.chunks_exact(3).map(|f| {
                Face::new(
                    base + f[0] as usize,
                    base + f[1] as usize,
                    base + f[2] as usize,
                )
            }));
        }

        let name = path
            .file_stem()
            .map_or_else(|| "obj".to_string(), |s| s.to_string_lossy().into_owned());
        log::info!(
            "loaded '{}' from {}: {} vertices, {} faces",
            name,
            path.display(),
            vertices.len(),
            faces.len()
        );
        Self::new(name, vertices, faces, color)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Base RGB color of every triangle this model emits.
    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn set_color(&mut self, color: [u8; 3]) {
        self.color = color;
    }

    /// The three model-space corners of a face.
    pub fn face_vertices(&self, face: Face) -> [Vec3; 3] {
        face.indices().map(|i| self.vertices[i])
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::cube(2.0, colors::DEFAULT_BASE_COLOR)
    }
}
