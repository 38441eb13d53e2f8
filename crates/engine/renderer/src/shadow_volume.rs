//! Stencil shadow volumes
//!
//! The volume is built from the silhouette of a mesh as seen from a
//! directional light. Every face turned away from the light contributes its
//! three edges; edges shared by two such faces appear once in each direction
//! and cancel, which leaves the silhouette. Each remaining edge is extruded
//! along the light direction into a quad of two triangles.
//!
//! No caps are generated: the volume relies on the depth test against the
//! already rendered scene (z-pass counting).

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Error, Result};
use crate::mesh::Mesh;

/// Vertex capacity of a shadow volume buffer
pub const DEFAULT_CAPACITY: usize = 32000;

/// Distance silhouette edges are pushed along the light
pub const EXTRUSION_DISTANCE: f32 = 100.0;

/// Directed edges `(a, b)` on the boundary between faces turned towards and away from the light
///
/// # Arguments
/// * `mesh` - Closed mesh with clockwise front faces
/// * `light` - Direction the light travels, in the mesh's space
pub fn silhouette_edges(mesh: &Mesh, light: Vec3) -> Vec<(u32, u32)> {
    let towards_light = -light;
    let positions = mesh.positions();

    let mut edges: Vec<Option<(u32, u32)>> = Vec::new();
    let mut open: HashMap<(u32, u32), Vec<usize>> = HashMap::new();

    for [i0, i1, i2] in mesh.faces() {
        let v0 = positions[i0 as usize];
        let v1 = positions[i1 as usize];
        let v2 = positions[i2 as usize];

        // Points into the mesh for clockwise faces
        let normal = (v2 - v1).cross(v1 - v0);
        if normal.dot(towards_light) < 0.0 {
            continue;
        }

        for (a, b) in [(i0, i1), (i1, i2), (i2, i0)] {
            let twin = open.get_mut(&(b, a)).and_then(|slots| slots.pop());
            match twin {
                Some(slot) => edges[slot] = None,
                None => {
                    open.entry((a, b)).or_default().push(edges.len());
                    edges.push(Some((a, b)));
                }
            }
        }
    }

    edges.into_iter().flatten().collect()
}

/// How the volume is counted into the stencil buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StencilStrategy {
    /// One draw with separate operations for each face orientation
    #[default]
    TwoSided,
    /// Two draws, one per face orientation
    TwoPass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CullMode {
    None,
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Increment,
    Decrement,
}

/// One draw of the volume geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumePass {
    /// Debug view: the volume drawn visibly, no stencil, no depth writes, no culling
    Visible,
    /// Stencil-only draw
    ///
    /// The stencil test always passes with reference 1; failing stencil or
    /// depth keeps the value and passing applies the per-orientation
    /// operation. Colour and depth writes are off and shading is flat.
    Stencil {
        cull: CullMode,
        clockwise: StencilOp,
        counter_clockwise: StencilOp,
    },
}

/// Receives the draws of a shadow volume
pub trait ShadowSink {
    fn draw_volume(&mut self, vertices: &[Vec3], pass: &VolumePass);

    /// Back to default state: cull counter-clockwise, depth writes on, stencil and blending off
    fn restore(&mut self) {}
}

/// Passes needed to count a volume with the given strategy
pub fn stencil_passes(strategy: StencilStrategy) -> Vec<VolumePass> {
    match strategy {
        StencilStrategy::TwoSided => vec![VolumePass::Stencil {
            cull: CullMode::None,
            clockwise: StencilOp::Increment,
            counter_clockwise: StencilOp::Decrement,
        }],
        StencilStrategy::TwoPass => vec![
            VolumePass::Stencil {
                cull: CullMode::Clockwise,
                clockwise: StencilOp::Increment,
                counter_clockwise: StencilOp::Increment,
            },
            VolumePass::Stencil {
                cull: CullMode::CounterClockwise,
                clockwise: StencilOp::Decrement,
                counter_clockwise: StencilOp::Decrement,
            },
        ],
    }
}

/// Extruded silhouette geometry for one caster
#[derive(Debug, Clone)]
pub struct ShadowVolume {
    vertices: Vec<Vec3>,
    capacity: usize,
    show_volumes: bool,
}

impl Default for ShadowVolume {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ShadowVolume {
    pub fn new(capacity: usize) -> Self {
        Self {
            vertices: Vec::new(),
            capacity,
            show_volumes: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reset(&mut self) {
        self.vertices.clear();
    }

    /// Draw the volume visibly before the stencil passes
    pub fn set_show_volumes(&mut self, show: bool) {
        self.show_volumes = show;
    }

    pub fn show_volumes(&self) -> bool {
        self.show_volumes
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Append the extruded silhouette of `mesh`
    ///
    /// Geometry is appended to what is already there; call [`reset`](Self::reset)
    /// first to rebuild. Nothing is appended when the result would not fit.
    ///
    /// # Arguments
    /// * `mesh` - Caster geometry
    /// * `light` - Direction the light travels, in the mesh's space
    pub fn build_from_mesh(&mut self, mesh: &Mesh, light: Vec3) -> Result<()> {
        let edges = silhouette_edges(mesh, light);
        let required = self.vertices.len() + edges.len() * 6;
        if required > self.capacity {
            tracing::warn!(
                "Shadow volume overflow: {} vertices needed, capacity {}",
                required,
                self.capacity
            );
            return Err(Error::CapacityExceeded {
                required,
                capacity: self.capacity,
            });
        }

        let positions = mesh.positions();
        let offset = light * EXTRUSION_DISTANCE;
        for (a, b) in edges {
            let near_a = positions[a as usize];
            let near_b = positions[b as usize];
            let far_a = near_a + offset;
            let far_b = near_b + offset;
            self.vertices
                .extend_from_slice(&[near_a, near_b, far_a, near_b, far_b, far_a]);
        }
        Ok(())
    }

    /// Issue the draws for the volume
    pub fn render(&self, sink: &mut impl ShadowSink, strategy: StencilStrategy) {
        if self.show_volumes {
            sink.draw_volume(&self.vertices, &VolumePass::Visible);
        }
        for pass in stencil_passes(strategy) {
            sink.draw_volume(&self.vertices, &pass);
        }
        sink.restore();
    }
}
