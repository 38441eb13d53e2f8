//! Terrain vertex and index buffers
//!
//! Vertices are grouped in blocks of `(width + 1)²`, one block per cell,
//! blocks ordered x-fastest. Within a block the x sub-index is outer and the
//! z sub-index inner. Every cell is drawn with the same index list offset by
//! its block's base vertex.

use glam::{Vec2, Vec3};

use crate::heightfield::Heightfield;

/// One terrain vertex
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Detail texture blend weight, 0..=255
    pub blend: u8,
    /// Texture coordinates shared by both texture layers
    pub uv: Vec2,
}

/// Blend weight from height: higher ground gets more of the second layer
pub fn blend_weight(height: f32) -> u8 {
    ((height + 8.0) * 20.0).clamp(0.0, 255.0) as u8
}

fn face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    (v2 - v1).cross(v3 - v2).normalize_or_zero()
}

/// Vertex normal from the faces around grid point `(x, z)`
///
/// Neighbours sit one unit away horizontally, independent of the grid
/// scale, which gives a softer shading than the true slope.
pub fn vertex_normal(field: &Heightfield, x: usize, z: usize) -> Vec3 {
    let last = field.dim() - 1;
    let fx = x as f32 * field.scale();
    let fz = z as f32 * field.scale();
    let v1 = Vec3::new(fx, field.sample(x, z), fz);

    let mut normal = Vec3::ZERO;
    if z != 0 && x != 0 {
        let v2 = Vec3::new(fx, field.sample(x, z - 1), fz - 1.0);
        let v3 = Vec3::new(fx - 1.0, field.sample(x - 1, z), fz);
        normal += face_normal(v1, v2, v3);
    }
    if z != last && x != 0 {
        let v2 = Vec3::new(fx - 1.0, field.sample(x - 1, z), fz);
        let v3 = Vec3::new(fx, field.sample(x, z + 1), fz + 1.0);
        normal += face_normal(v1, v2, v3);
    }
    if z != 0 && x != last {
        let v2 = Vec3::new(fx + 1.0, field.sample(x + 1, z), fz);
        let v3 = Vec3::new(fx, field.sample(x, z - 1), fz - 1.0);
        normal += face_normal(v1, v2, v3);
    }
    if z != last && x != last {
        let v2 = Vec3::new(fx, field.sample(x, z + 1), fz + 1.0);
        let v3 = Vec3::new(fx + 1.0, field.sample(x + 1, z), fz);
        normal += face_normal(v1, v2, v3);
    }
    normal.normalize_or_zero()
}

/// Build the vertex buffer for a grid of `cells_dim²` cells of `width` quads
pub fn build_vertices(field: &Heightfield, cells_dim: usize, width: usize) -> Vec<TerrainVertex> {
    let side = width + 1;
    let mut vertices = Vec::with_capacity(cells_dim * cells_dim * side * side);
    let texel = field.scale() / 16.0;

    for cell_z in 0..cells_dim {
        for cell_x in 0..cells_dim {
            for sub_x in 0..side {
                for sub_z in 0..side {
                    let x = sub_x + cell_x * width;
                    let z = sub_z + cell_z * width;
                    let height = field.sample(x, z);
                    vertices.push(TerrainVertex {
                        position: Vec3::new(x as f32 * field.scale(), height, z as f32 * field.scale()),
                        normal: vertex_normal(field, x, z),
                        blend: blend_weight(height),
                        uv: Vec2::new(x as f32 * texel, z as f32 * texel),
                    });
                }
            }
        }
    }

    tracing::debug!("Filled terrain vertex buffer: {} vertices", vertices.len());
    vertices
}

/// Index list for one cell of `width × width` quads, two triangles each
pub fn build_indices(width: usize) -> Vec<u16> {
    let side = width + 1;
    let mut indices = Vec::with_capacity(width * width * 6);
    for row in 0..width {
        for column in 0..width {
            let first = (column + row * side) as u16;
            let side = side as u16;
            indices.extend_from_slice(&[
                first,
                first + 1,
                first + side,
                first + side,
                first + 1,
                first + side + 1,
            ]);
        }
    }
    indices
}
