//! Vehicle physics constants

use glam::Vec3;
use serde::Deserialize;

/// Physical constants of the hovercraft
///
/// Owned by [`crate::Vehicle`]; the application may override any field from
/// its config file, missing fields fall back to [`PhysicsConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Body mass
    pub mass: f32,
    /// Full body dimensions (width, height, length)
    pub size: Vec3,
    /// Gravitational acceleration (positive, applied along -y)
    pub gravity: f32,
    /// Magnitude of the forward/reverse engine force
    pub linear_thrust: f32,
    /// Magnitude of the sideways steering force
    pub angular_thrust: f32,
    /// Quadratic drag coefficient on linear velocity
    pub linear_air_resistance: f32,
    /// Linear drag coefficient on angular velocity
    pub angular_air_resistance: f32,
    /// Distance below which a contact sample produces hover lift
    pub hover_height: f32,
    /// How far below the hover height velocity into the ground is cancelled
    pub support_margin: f32,
    /// Distance below which engine thrust keeps its vertical component
    pub near_terrain_distance: f32,
    /// Scale applied to the angular response of each hovering sample
    pub angular_softening: f32,
    /// Minimum distance kept between the body and the terrain border
    pub boundary_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: 150.0,
            size: Vec3::new(6.0, 1.0, 6.0),
            gravity: 100.0,
            linear_thrust: 40000.0,
            angular_thrust: 500.0,
            linear_air_resistance: 30.0,
            angular_air_resistance: 1000.0,
            hover_height: 1.0,
            support_margin: 0.5,
            near_terrain_distance: 1.0,
            angular_softening: 0.0002,
            boundary_margin: 5.0,
        }
    }
}

impl PhysicsConfig {
    /// Distance below which velocity into the ground is cancelled
    pub fn support_height(&self) -> f32 {
        self.hover_height - self.support_margin
    }

    /// Turning torque about the body's up axis
    pub fn turn_torque(&self) -> Vec3 {
        Vec3::new(0.0, 2.0 * self.angular_thrust * self.size.z, 0.0)
    }

    /// Body-space inertia tensor of a solid box, inverted
    ///
    /// The box tensor is diagonal so its inverse is taken per component.
    pub fn inverse_body_inertia(&self) -> glam::Mat3 {
        let Vec3 { x, y, z } = self.size;
        let k = self.mass / 12.0;
        let diagonal = Vec3::new(k * (y * y + z * z), k * (x * x + z * z), k * (x * x + y * y));
        glam::Mat3::from_diagonal(diagonal.recip())
    }
}
