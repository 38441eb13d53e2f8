//! Critically damped spring that trails the camera behind a moving target

use glam::Vec3;

/// Speed in the ground plane above which the camera swings behind the velocity
pub const FOLLOW_SPEED: f32 = 2.5;

/// Spring-damper camera follower
///
/// The spring pulls the camera towards a point `follow_distance` behind and
/// `follow_height` above the target. Damping is fixed at `2·√ω²`, which makes
/// the spring critically damped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCam {
    chase_position: Vec3,
    chase_velocity: Vec3,
    chase_direction: Vec3,
    camera_position: Vec3,
    camera_velocity: Vec3,
    follow_distance: f32,
    follow_height: f32,
    omega_sq: f32,
    beta: f32,
}

impl ChaseCam {
    /// # Arguments
    /// * `follow_distance` - Horizontal distance kept behind the target
    /// * `follow_height` - Height kept above the target
    /// * `omega_sq` - Spring stiffness (natural frequency squared)
    pub fn new(follow_distance: f32, follow_height: f32, omega_sq: f32) -> Self {
        Self {
            chase_position: Vec3::ZERO,
            chase_velocity: Vec3::ZERO,
            chase_direction: Vec3::Z,
            camera_position: Vec3::ZERO,
            camera_velocity: Vec3::ZERO,
            follow_distance,
            follow_height,
            omega_sq,
            beta: 2.0 * omega_sq.sqrt(),
        }
    }

    /// Advance the spring by `dt`
    ///
    /// With `use_direction` the camera trails the target's heading. Otherwise
    /// it trails the velocity when the target moves faster than
    /// [`FOLLOW_SPEED`], and below that keeps its current bearing and only
    /// corrects its distance and height.
    pub fn update_position(&mut self, dt: f32, use_direction: bool) {
        let target_height = self.chase_position.y + self.follow_height;

        let mut accel = if use_direction {
            self.pull_towards(self.chase_direction, target_height)
        } else {
            let speed = Vec3::new(self.chase_velocity.x, 0.0, self.chase_velocity.z).length();
            if speed > FOLLOW_SPEED {
                self.pull_towards(self.chase_velocity / speed, target_height)
            } else {
                let offset = self.camera_position - self.chase_position;
                let r = Vec3::new(offset.x, 0.0, offset.z).length();
                let mut a = Vec3::ZERO;
                if r > 0.001 {
                    let k = -self.omega_sq * (r - self.follow_distance) / r;
                    a.x = offset.x * k;
                    a.z = offset.z * k;
                }
                a.y = -self.omega_sq * (offset.y - self.follow_height);
                a
            }
        };

        accel -= self.beta * (self.camera_velocity - self.chase_velocity);

        self.camera_velocity += accel * dt;
        self.camera_position += self.camera_velocity * dt;
    }

    /// Spring acceleration towards the point behind the target along `heading`
    fn pull_towards(&self, heading: Vec3, target_height: f32) -> Vec3 {
        let anchor = self.chase_position - self.follow_distance * heading;
        Vec3::new(
            -self.omega_sq * (self.camera_position.x - anchor.x),
            -self.omega_sq * (self.camera_position.y - target_height),
            -self.omega_sq * (self.camera_position.z - anchor.z),
        )
    }

    pub fn set_chase_position(&mut self, position: Vec3) {
        self.chase_position = position;
    }

    pub fn set_chase_velocity(&mut self, velocity: Vec3) {
        self.chase_velocity = velocity;
    }

    pub fn set_chase_direction(&mut self, direction: Vec3) {
        self.chase_direction = direction;
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera_position = position;
    }

    pub fn set_camera_velocity(&mut self, velocity: Vec3) {
        self.camera_velocity = velocity;
    }

    /// Change follow distance and height, keeping the spring constants
    pub fn set_parameters(&mut self, follow_distance: f32, follow_height: f32) {
        self.follow_distance = follow_distance;
        self.follow_height = follow_height;
    }

    pub fn chase_position(&self) -> Vec3 {
        self.chase_position
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn camera_velocity(&self) -> Vec3 {
        self.camera_velocity
    }

    pub fn follow_distance(&self) -> f32 {
        self.follow_distance
    }

    pub fn follow_height(&self) -> f32 {
        self.follow_height
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }
}
