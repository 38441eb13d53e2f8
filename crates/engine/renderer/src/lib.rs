//! Render-side data for the hovercraft
//!
//! This crate prepares everything a graphics backend needs and issues draws
//! through small sink traits; it never talks to a device itself.

pub mod camera;
pub mod chase_cam;
mod error;
pub mod mesh;
pub mod scene;
pub mod shadow_volume;

pub use camera::{Camera, Projection};
pub use chase_cam::ChaseCam;
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use scene::{Light, Scene, MAX_LIGHTS};
pub use shadow_volume::{
    silhouette_edges, stencil_passes, CullMode, ShadowSink, ShadowVolume, StencilOp,
    StencilStrategy, VolumePass,
};
