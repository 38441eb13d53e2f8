//! Procedural terrain for the hovercraft
//!
//! - [`noise`]: hash-based value noise summed over three octaves
//! - [`Heightfield`]: the sampled grid with bilinear height queries
//! - [`Frustum`]: clip planes extracted from a view-projection matrix
//! - [`Quadtree`]: per-cell bounding boxes for visibility culling
//! - [`Terrain`]: ties the above together with the render buffers

mod error;
pub mod frustum;
pub mod heightfield;
pub mod mesh;
pub mod noise;
pub mod quadtree;
pub mod terrain;

pub use error::{Error, Result};
pub use frustum::{Frustum, Intersection, Plane};
pub use heightfield::Heightfield;
pub use hovercraft_physics::Aabb;
pub use mesh::TerrainVertex;
pub use quadtree::{CellLayout, NodeId, NodeKind, Quadtree, QuadtreeNode};
pub use terrain::{
    CellSink, Terrain, TerrainConfig, FACES_PER_CELL, LEAFNODE_WIDTH, TERRAIN_SCALE,
    VERTICES_PER_CELL,
};
