//! Procedural terrain: heights, geometry buffers and per-frame culling

use glam::Mat4;
use hovercraft_physics::HeightField;
use serde::Deserialize;

use crate::error::Result;
use crate::frustum::Frustum;
use crate::heightfield::Heightfield;
use crate::mesh::{self, TerrainVertex};
use crate::quadtree::{CellLayout, Quadtree};

/// World units between neighbouring height samples
pub const TERRAIN_SCALE: f32 = 4.0;

/// Quads along one side of a terrain cell
pub const LEAFNODE_WIDTH: usize = 40;

/// Vertices in one cell's block
pub const VERTICES_PER_CELL: u32 = ((LEAFNODE_WIDTH + 1) * (LEAFNODE_WIDTH + 1)) as u32;

/// Triangles drawn per cell
pub const FACES_PER_CELL: u32 = (LEAFNODE_WIDTH * LEAFNODE_WIDTH * 2) as u32;

/// Vertical range given to every cell's bounding box
pub const CELL_MIN_Y: f32 = -100.0;
pub const CELL_MAX_Y: f32 = 100.0;

/// Terrain settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along each axis; must be a power of two
    pub cells_dim: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { cells_dim: 32 }
    }
}

impl TerrainConfig {
    /// Height samples along each axis
    pub fn heightmap_dim(&self) -> usize {
        self.cells_dim * LEAFNODE_WIDTH + 1
    }
}

/// Receives one indexed draw per visible cell
pub trait CellSink {
    /// Draw `face_count` triangles of the shared cell index list, offset by `base_vertex`
    fn draw_cell(&mut self, base_vertex: u32, vertex_count: u32, face_count: u32);
}

/// Generated terrain with its quadtree and geometry
#[derive(Debug, Clone)]
pub struct Terrain {
    config: TerrainConfig,
    heightfield: Heightfield,
    quadtree: Quadtree,
    vertices: Vec<TerrainVertex>,
    indices: Vec<u16>,
    visible: Vec<u32>,
}

impl Terrain {
    /// Generate heights, geometry and the culling tree
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let heightfield = Heightfield::generate(config.heightmap_dim(), TERRAIN_SCALE)?;
        Self::from_heightfield(config, heightfield)
    }

    /// Build geometry and the culling tree over existing heights
    ///
    /// The heightfield dimension must be `cells_dim * LEAFNODE_WIDTH + 1`.
    pub fn from_heightfield(config: TerrainConfig, heightfield: Heightfield) -> Result<Self> {
        let quadtree = Quadtree::build(CellLayout {
            cells_dim: config.cells_dim,
            cell_size: LEAFNODE_WIDTH as f32 * TERRAIN_SCALE,
            min_y: CELL_MIN_Y,
            max_y: CELL_MAX_Y,
            vertices_per_cell: VERTICES_PER_CELL,
        })?;

        let expected = config.heightmap_dim();
        if heightfield.dim() != expected {
            return Err(crate::Error::HeightCount {
                dim: expected,
                expected: expected * expected,
                actual: heightfield.heights().len(),
            });
        }

        let vertices = mesh::build_vertices(&heightfield, config.cells_dim, LEAFNODE_WIDTH);
        let indices = mesh::build_indices(LEAFNODE_WIDTH);
        tracing::info!(
            "Terrain ready: {} cells, {} vertices, extent {}",
            config.cells_dim * config.cells_dim,
            vertices.len(),
            heightfield.size()
        );

        Ok(Self {
            config,
            heightfield,
            quadtree,
            vertices,
            indices,
            visible: Vec::new(),
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    pub fn quadtree(&self) -> &Quadtree {
        &self.quadtree
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Index list shared by every cell
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Horizontal extent in world units
    pub fn terrain_size(&self) -> f32 {
        self.heightfield.size()
    }

    /// Bilinear height at a world position
    pub fn height_map_point(&self, x: f32, z: f32) -> f32 {
        self.heightfield.height_at(x, z)
    }

    /// Recompute the visible cell list for a frustum
    pub fn cull(&mut self, frustum: &Frustum) {
        self.visible.clear();
        self.quadtree
            .add_visible_nodes(self.quadtree.root(), frustum, &mut self.visible);
    }

    /// Recompute the visible cell list from a camera's view-projection matrix
    pub fn cull_view_proj(&mut self, view_proj: &Mat4) {
        let frustum = Frustum::extract(view_proj, false);
        self.cull(&frustum);
    }

    /// Base vertices of the cells found visible by the last cull
    pub fn visible_cells(&self) -> &[u32] {
        &self.visible
    }

    pub fn visible_cell_count(&self) -> usize {
        self.visible.len()
    }

    /// Issue one draw per visible cell
    pub fn render(&self, sink: &mut impl CellSink) {
        for &base_vertex in &self.visible {
            sink.draw_cell(base_vertex, VERTICES_PER_CELL, FACES_PER_CELL);
        }
    }
}

impl HeightField for Terrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.heightfield.height_at(x, z)
    }

    fn size(&self) -> f32 {
        self.heightfield.size()
    }
}
