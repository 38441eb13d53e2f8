//! Rigid body integrator for the hovercraft
//!
//! The body is a solid box hovering on a 3×3 grid of underside samples. Each
//! step samples the terrain below every point, applies hover lift, support
//! damping and penetration correction, then integrates linear and angular
//! motion with explicit Euler.
//!
//! Orientation is kept as a rotation matrix whose columns are the body axes
//! in world space: `x_axis` is right, `y_axis` is up and `z_axis` is forward.

use glam::{Mat3, Mat4, Vec3};

use crate::collision::{CollisionGrid, POINTS_PER_EDGE};
use crate::config::PhysicsConfig;
use crate::height::HeightField;

/// Engine controls held down during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrustInput {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

impl ThrustInput {
    /// True when any engine is firing
    pub fn any(&self) -> bool {
        self.forward || self.reverse || self.left || self.right
    }
}

/// Mutable rigid body state of the vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// World-space position of the body centre
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Body axes in world space (columns: right, up, forward)
    pub orientation: Mat3,
    /// Angular momentum
    pub angular_momentum: Vec3,
    /// Angular velocity derived from momentum and the world inertia tensor
    pub angular_velocity: Vec3,
    /// Inverse inertia tensor rotated into world space
    pub world_inverse_inertia: Mat3,
    /// Whether any contact sample was within hover height on the last step
    pub on_ground: bool,
}

impl VehicleState {
    /// At rest, upright, at the given position
    pub fn at_rest(position: Vec3, inverse_body_inertia: Mat3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
            angular_momentum: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            world_inverse_inertia: inverse_body_inertia,
            on_ground: false,
        }
    }
}

/// Skew-symmetric matrix such that `skew(v) * x == v.cross(x)`
pub fn skew(v: Vec3) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.0, v.z, -v.y),
        Vec3::new(-v.z, 0.0, v.x),
        Vec3::new(v.y, -v.x, 0.0),
    )
}

/// Partial Gram-Schmidt on the body axes
///
/// The right axis is authoritative: it is normalized first, forward is
/// rebuilt from right × up and up from forward × right.
pub fn orthonormalize(orientation: Mat3) -> Mat3 {
    let right = orientation.x_axis.normalize();
    let forward = right.cross(orientation.y_axis).normalize();
    let up = forward.cross(right).normalize();
    Mat3::from_cols(right, up, forward)
}

/// Applies an incremental rotation `dθ` given in world space
///
/// Equivalent to left-multiplying the row-basis by `I + skew(dθ)`.
fn rotate_incremental(orientation: Mat3, delta: Vec3) -> Mat3 {
    orientation + orientation * skew(delta).transpose()
}

/// Hovercraft rigid body
///
/// # Example
/// ```
/// use glam::Vec3;
/// use hovercraft_physics::{FlatGround, PhysicsConfig, ThrustInput, Vehicle};
///
/// let ground = FlatGround::new(0.0, 320.0);
/// let mut vehicle = Vehicle::new(Vec3::new(160.0, 2.0, 160.0), PhysicsConfig::default());
/// for _ in 0..100 {
///     vehicle.step(0.016, &ground, ThrustInput::default());
/// }
/// assert!(vehicle.is_on_ground());
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    config: PhysicsConfig,
    grid: CollisionGrid,
    inverse_body_inertia: Mat3,
    state: VehicleState,
}

impl Vehicle {
    /// Create a vehicle at rest
    ///
    /// # Arguments
    /// * `position` - Initial world position of the body centre
    /// * `config` - Physical constants
    pub fn new(position: Vec3, config: PhysicsConfig) -> Self {
        let grid = CollisionGrid::from_box(config.size);
        let inverse_body_inertia = config.inverse_body_inertia();
        tracing::debug!(
            "Vehicle created at {:?} (mass {}, size {:?})",
            position,
            config.mass,
            config.size
        );

        Self {
            config,
            grid,
            inverse_body_inertia,
            state: VehicleState::at_rest(position, inverse_body_inertia),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn collision_grid(&self) -> &CollisionGrid {
        &self.grid
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Body forward axis in world space
    pub fn direction(&self) -> Vec3 {
        self.state.orientation.z_axis
    }

    pub fn orientation(&self) -> Mat3 {
        self.state.orientation
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.state.angular_velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.state.on_ground
    }

    /// Teleport the vehicle without touching its motion
    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    /// World transform (translation × rotation) for rendering
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.state.position) * Mat4::from_mat3(self.state.orientation)
    }

    /// Transform a body-space point into world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.state.orientation * local + self.state.position
    }

    /// Rotate a world-space direction into body space
    pub fn direction_to_local(&self, world: Vec3) -> Vec3 {
        self.state.orientation.transpose() * world
    }

    /// Advance the body by `dt` seconds
    ///
    /// `dt` is expected to be clamped by the caller (0.1 s in the game loop).
    ///
    /// # Arguments
    /// * `dt` - Step length in seconds
    /// * `terrain` - Ground the vehicle hovers over
    /// * `input` - Engines firing during this step
    pub fn step(&mut self, dt: f32, terrain: &impl HeightField, input: ThrustInput) {
        let cfg = self.config;
        let mass = cfg.mass;
        let gravity = Vec3::new(0.0, -cfg.gravity, 0.0);
        let support_height = cfg.support_height();

        let state = &mut self.state;
        let basis = state.orientation;
        let up = basis.y_axis;

        let mut linear_thrust = basis * Vec3::new(0.0, 0.0, cfg.linear_thrust);
        let side_thrust = basis * Vec3::new(cfg.angular_thrust, 0.0, 0.0);
        let turn_torque = cfg.turn_torque();

        // Drag uses the velocity from the start of the step
        let velocity_squared = state.velocity * state.velocity.abs();

        let mut force = Vec3::ZERO;
        let mut torque = Vec3::ZERO;

        // Lift shared between the samples along one edge
        let lift = gravity * (-mass / POINTS_PER_EDGE as f32);
        let hover_force = up * lift.dot(up);

        let mut hover_applied = false;
        let mut near_terrain = false;
        let mut deepest = 0.0_f32;
        let mut angular_displacement = Vec3::ZERO;
        state.on_ground = false;

        for (point, offset) in self.grid.iter() {
            let world = basis * point + state.position;
            let distance = world.y - terrain.height_at(world.x, world.z);

            if distance < cfg.near_terrain_distance {
                near_terrain = true;
            }

            if distance < cfg.hover_height {
                state.on_ground = true;
                if !hover_applied {
                    force += hover_force;
                    hover_applied = true;
                }
                angular_displacement += offset.cross(hover_force) * (dt * cfg.angular_softening);
            }

            if distance < support_height {
                state.velocity += up * (-state.velocity).dot(up);
            }

            if distance < deepest {
                deepest = distance;
            }
        }

        // Every hovering sample was evaluated against the same basis, so the
        // perturbations are summed and applied once
        state.orientation = rotate_incremental(state.orientation, angular_displacement);
        state.position.y -= deepest;

        force += gravity * mass;

        if !near_terrain {
            linear_thrust.y = 0.0;
        }
        if input.forward {
            force += linear_thrust;
        }
        if input.reverse {
            force -= linear_thrust;
        }
        if input.left {
            force -= side_thrust;
            torque += turn_torque;
        }
        if input.right {
            force += side_thrust;
            torque -= turn_torque;
        }

        force -= velocity_squared * cfg.linear_air_resistance;
        torque -= state.angular_velocity * cfg.angular_air_resistance;

        state.position += state.velocity * dt;
        state.velocity += force / mass * dt;

        state.orientation = rotate_incremental(state.orientation, state.angular_velocity * dt);
        state.angular_momentum += torque * dt;

        state.orientation = orthonormalize(state.orientation);

        let basis = state.orientation;
        state.world_inverse_inertia = basis.transpose() * self.inverse_body_inertia * basis;
        state.angular_velocity = state.world_inverse_inertia * state.angular_momentum;

        let max = terrain.size() - cfg.boundary_margin;
        state.position.x = state.position.x.clamp(cfg.boundary_margin, max);
        state.position.z = state.position.z.clamp(cfg.boundary_margin, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::FlatGround;

    fn assert_orthonormal(m: Mat3) {
        let axes = [m.x_axis, m.y_axis, m.z_axis];
        for (i, a) in axes.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-4, "Axis {} not unit length: {:?}", i, a);
            for b in axes.iter().skip(i + 1) {
                assert!(a.dot(*b).abs() < 1e-4, "Axes not orthogonal: {:?} {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_skew_matches_cross() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        let x = Vec3::new(0.5, 4.0, -1.0);
        let diff = skew(v) * x - v.cross(x);
        assert!(diff.length() < 1e-6, "skew(v) * x should equal v × x");
    }

    #[test]
    fn test_orthonormalize_keeps_right_axis_direction() {
        let skewed = Mat3::from_cols(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.1, 1.0, 0.0),
            Vec3::new(0.0, 0.2, 0.9),
        );
        let fixed = orthonormalize(skewed);

        assert_orthonormal(fixed);
        assert!((fixed.x_axis - Vec3::X).length() < 1e-6, "Right axis is authoritative");
        assert!(fixed.y_axis.y > 0.9);
        assert!(fixed.z_axis.z > 0.9);
    }

    #[test]
    fn test_falls_under_gravity_when_airborne() {
        let ground = FlatGround::new(0.0, 320.0);
        let mut vehicle = Vehicle::new(Vec3::new(160.0, 50.0, 160.0), PhysicsConfig::default());

        vehicle.step(0.01, &ground, ThrustInput::default());

        assert!(!vehicle.is_on_ground());
        assert_eq!(vehicle.position().y, 50.0, "Position integrates the old velocity");
        assert!((vehicle.velocity().y + 1.0).abs() < 1e-4, "v.y should be -g*dt");
    }

    #[test]
    fn test_penetration_lifts_body() {
        let ground = FlatGround::new(10.0, 320.0);
        let mut vehicle = Vehicle::new(Vec3::new(160.0, 9.0, 160.0), PhysicsConfig::default());

        vehicle.step(0.01, &ground, ThrustInput::default());

        // Underside sits at 8.5, 1.5 below ground
        assert!(vehicle.is_on_ground());
        assert!(
            (vehicle.position().y - 10.5).abs() < 1e-3,
            "Deepest sample should be pushed to the surface, got {}",
            vehicle.position().y
        );
    }

    #[test]
    fn test_position_clamped_to_terrain() {
        let ground = FlatGround::new(0.0, 100.0);
        let mut vehicle = Vehicle::new(Vec3::new(-20.0, 5.0, 500.0), PhysicsConfig::default());

        vehicle.step(0.016, &ground, ThrustInput::default());

        assert_eq!(vehicle.position().x, 5.0);
        assert_eq!(vehicle.position().z, 95.0);
    }

    #[test]
    fn test_left_turn_yaws_towards_negative_x() {
        let ground = FlatGround::new(0.0, 320.0);
        let mut vehicle = Vehicle::new(Vec3::new(160.0, 1.0, 160.0), PhysicsConfig::default());
        let input = ThrustInput {
            left: true,
            ..Default::default()
        };

        for _ in 0..20 {
            vehicle.step(0.016, &ground, input);
        }

        assert!(vehicle.angular_velocity().y > 0.0, "Left torque spins about +y");
        assert!(vehicle.direction().x < 0.0, "Nose should swing left");
        assert_orthonormal(vehicle.orientation());
    }

    #[test]
    fn test_transform_places_body_axes() {
        let vehicle = Vehicle::new(Vec3::new(1.0, 2.0, 3.0), PhysicsConfig::default());
        let transform = vehicle.transform();

        assert_eq!(transform.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(vehicle.to_world(Vec3::Z), Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(vehicle.direction(), Vec3::Z);
    }

    #[test]
    fn test_thrust_input_any() {
        assert!(!ThrustInput::default().any());
        assert!(ThrustInput {
            reverse: true,
            ..Default::default()
        }
        .any());
    }
}
