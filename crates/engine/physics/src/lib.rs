//! Hovercraft rigid body physics
//!
//! A single box-shaped body hovering over a heightfield, sampled on a fixed
//! grid of contact points. There is no broad phase and no general collider
//! support; the terrain is reached through the [`HeightField`] trait.

pub mod collision;
pub mod config;
pub mod height;
pub mod vehicle;

pub use collision::{Aabb, CollisionGrid, POINTS_PER_EDGE, POINT_COUNT};
pub use config::PhysicsConfig;
pub use height::{FlatGround, HeightField};
pub use vehicle::{orthonormalize, skew, ThrustInput, Vehicle, VehicleState};

// Re-export for convenience
pub use glam;
