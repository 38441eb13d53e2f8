//! Quadtree over terrain cells
//!
//! Nodes live in a flat arena and refer to their children by index. The tree
//! is built bottom-up: one leaf per terrain cell, then 2×2 groups of each
//! level are merged until a single root remains.

use glam::Vec3;
use hovercraft_physics::Aabb;

use crate::error::{Error, Result};
use crate::frustum::{Frustum, Intersection};

/// Index of a node inside [`Quadtree::nodes`]
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Terrain cell; `base_vertex` is the first vertex of its block in the vertex buffer
    Leaf { base_vertex: u32 },
    /// Four children in fixed order
    Internal { children: [NodeId; 4] },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadtreeNode {
    pub aabb: Aabb,
    pub kind: NodeKind,
}

impl QuadtreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

/// Layout of the cell grid the tree is built over
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    /// Cells along each horizontal axis, a power of two
    pub cells_dim: usize,
    /// World-space width of one cell
    pub cell_size: f32,
    /// Vertical extent given to every leaf
    pub min_y: f32,
    pub max_y: f32,
    /// Vertices in one cell's block of the vertex buffer
    pub vertices_per_cell: u32,
}

/// Immutable quadtree with an index arena
#[derive(Clone, Debug)]
pub struct Quadtree {
    nodes: Vec<QuadtreeNode>,
    root: NodeId,
}

impl Quadtree {
    /// Build the tree for a square grid of cells
    ///
    /// Leaf `(cx, cz)` spans `[cx * cell_size, (cx + 1) * cell_size]` in x and
    /// the same in z, and points at vertex block `cx + cz * cells_dim`.
    /// Parents take their x/z bounds from the children and the y range of
    /// the first child.
    pub fn build(layout: CellLayout) -> Result<Self> {
        let n = layout.cells_dim;
        if n == 0 || !n.is_power_of_two() {
            return Err(Error::InvalidCellCount(n));
        }

        let mut nodes = Vec::with_capacity(n * n * 4 / 3 + 1);
        let mut level: Vec<NodeId> = vec![0; n * n];

        for cx in 0..n {
            for cz in 0..n {
                let min = Vec3::new(cx as f32 * layout.cell_size, layout.min_y, cz as f32 * layout.cell_size);
                let max = Vec3::new(min.x + layout.cell_size, layout.max_y, min.z + layout.cell_size);
                let base_vertex = layout.vertices_per_cell * (cx + cz * n) as u32;

                level[cz * n + cx] = nodes.len();
                nodes.push(QuadtreeNode {
                    aabb: Aabb::new(min, max),
                    kind: NodeKind::Leaf { base_vertex },
                });
            }
        }

        let mut width = n / 2;
        while width >= 1 {
            let last = width * 2;
            let mut parents = Vec::with_capacity(width * width);
            for row in 0..width {
                for column in 0..width {
                    let first = (row * 2) * last + column * 2;
                    let second = (row * 2 + 1) * last + column * 2;
                    let children = [level[first], level[first + 1], level[second], level[second + 1]];

                    let lead = nodes[children[0]].aabb;
                    let mut min = lead.min;
                    let mut max = lead.max;
                    for &child in &children[1..] {
                        let aabb = nodes[child].aabb;
                        min.x = min.x.min(aabb.min.x);
                        min.z = min.z.min(aabb.min.z);
                        max.x = max.x.max(aabb.max.x);
                        max.z = max.z.max(aabb.max.z);
                    }

                    parents.push(nodes.len());
                    nodes.push(QuadtreeNode {
                        aabb: Aabb::new(min, max),
                        kind: NodeKind::Internal { children },
                    });
                }
            }
            level = parents;
            width /= 2;
        }

        let root = level[0];
        tracing::info!("Built quadtree: {} nodes over {}×{} cells", nodes.len(), n, n);
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &QuadtreeNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[QuadtreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaf nodes
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Append the base vertex of every visible leaf under `id`
    ///
    /// Fully contained subtrees are added without further plane tests,
    /// straddling nodes recurse and outside nodes are dropped.
    pub fn add_visible_nodes(&self, id: NodeId, frustum: &Frustum, out: &mut Vec<u32>) {
        let node = &self.nodes[id];
        match frustum.classify(&node.aabb) {
            Intersection::Outside => {}
            Intersection::Inside => self.add_all_nodes(id, out),
            Intersection::Intersecting => match node.kind {
                NodeKind::Leaf { base_vertex } => out.push(base_vertex),
                NodeKind::Internal { children } => {
                    for child in children {
                        self.add_visible_nodes(child, frustum, out);
                    }
                }
            },
        }
    }

    /// Append the base vertex of every leaf under `id`, depth first
    pub fn add_all_nodes(&self, id: NodeId, out: &mut Vec<u32>) {
        match self.nodes[id].kind {
            NodeKind::Leaf { base_vertex } => out.push(base_vertex),
            NodeKind::Internal { children } => {
                for child in children {
                    self.add_all_nodes(child, out);
                }
            }
        }
    }

    /// Visible leaves for a frustum, starting at the root
    pub fn visible(&self, frustum: &Frustum) -> Vec<u32> {
        let mut out = Vec::new();
        self.add_visible_nodes(self.root, frustum, &mut out);
        out
    }
}
