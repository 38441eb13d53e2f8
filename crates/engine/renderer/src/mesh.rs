//! Indexed triangle meshes
//!
//! Triangles are wound clockwise when seen from their front side, in a
//! left-handed coordinate system, so `(v1 - v0) × (v2 - v0)` points outwards.

use std::path::Path;

use glam::Vec3;

use crate::error::{Error, Result};

/// Positions plus a triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh, checking that every index is in range
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self { positions, indices })
    }

    /// Closed box centred on the origin with shared corner vertices
    ///
    /// # Arguments
    /// * `size` - Full dimensions (width, height, length)
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        // Bit 0 selects +x, bit 1 +y, bit 2 +z
        let positions = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 != 0 { h.x } else { -h.x },
                    if i & 2 != 0 { h.y } else { -h.y },
                    if i & 4 != 0 { h.z } else { -h.z },
                )
            })
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 3,  0, 3, 1, // -z
            4, 5, 7,  4, 7, 6, // +z
            0, 4, 6,  0, 6, 2, // -x
            1, 3, 7,  1, 7, 5, // +x
            0, 1, 5,  0, 5, 4, // -y
            2, 6, 7,  2, 7, 3, // +y
        ];

        Self { positions, indices }
    }

    /// Load every model of a Wavefront OBJ file into one mesh
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            // Position indices only, so corners with several normals stay shared
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options).map_err(|source| Error::MeshLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for model in &models {
            let base = positions.len() as u32;
            positions.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            indices.extend(model.mesh.indices.iter().map(|&i| base + i));
        }

        if indices.is_empty() {
            return Err(Error::EmptyMesh(path.to_path_buf()));
        }

        tracing::info!(
            "Loaded mesh {}: {} vertices, {} triangles",
            path.display(),
            positions.len(),
            indices.len() / 3
        );
        Self::new(positions, indices)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of each triangle
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|f| [f[0], f[1], f[2]])
    }

    /// Positions of each triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces().map(|[a, b, c]| {
            [
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            ]
        })
    }
}
