//! View and projection for a look-at camera
//!
//! Left-handed coordinates, `[0, 1]` clip depth. The combined matrix is
//! `projection * view`, ready for [`glam::Mat4::row`]-based plane extraction.

use glam::{Mat4, Vec3};

/// Default vertical field of view (45 degrees)
pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_4;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            aspect: 4.0 / 3.0,
            near: 1.0,
            far: 350.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov, self.aspect, self.near, self.far)
    }
}

/// Look-at camera with cached matrices
///
/// # Example
///
/// ```
/// use hovercraft_renderer::camera::{Camera, Projection};
/// use glam::Vec3;
///
/// let mut camera = Camera::new(Projection::default());
/// camera.set_camera(Vec3::new(0.0, 10.0, -30.0), Vec3::ZERO, Vec3::Y);
/// assert_eq!(camera.look_at_point(), Vec3::ZERO);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    look_at: Vec3,
    up: Vec3,
    projection: Projection,
    projection_matrix: Mat4,
    view: Mat4,
    view_proj: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl Camera {
    /// Camera at the origin looking down +z
    pub fn new(projection: Projection) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            look_at: Vec3::Z,
            up: Vec3::Y,
            projection,
            projection_matrix: projection.matrix(),
            view: Mat4::IDENTITY,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view();
        camera
    }

    /// Place the camera and aim it at a point
    ///
    /// # Arguments
    /// * `position` - Eye position
    /// * `look_at` - Point the camera looks at
    /// * `up` - World up hint
    pub fn set_camera(&mut self, position: Vec3, look_at: Vec3, up: Vec3) {
        self.position = position;
        self.look_at = look_at;
        self.up = up;
        self.update_view();
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.projection_matrix = projection.matrix();
        self.view_proj = self.projection_matrix * self.view;
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_lh(self.position, self.look_at, self.up);
        self.view_proj = self.projection_matrix * self.view;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at_point(&self) -> Vec3 {
        self.look_at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    /// Unit vector from the eye to the look-at point
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_look_at() {
        let mut camera = Camera::default();
        camera.set_camera(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);

        let target = camera.view().transform_point3(Vec3::ZERO);
        assert!(
            (target - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5,
            "Look-at point should be straight ahead in view space, got {:?}",
            target
        );
        assert_eq!(camera.forward(), Vec3::Z);
    }

    #[test]
    fn test_view_proj_is_projection_times_view() {
        let mut camera = Camera::default();
        camera.set_camera(Vec3::new(3.0, 4.0, 5.0), Vec3::new(10.0, 0.0, 10.0), Vec3::Y);
        let expected = camera.projection_matrix() * camera.view();
        assert_eq!(camera.view_proj(), expected);
    }

    #[test]
    fn test_point_ahead_maps_into_clip_volume() {
        let mut camera = Camera::default();
        camera.set_camera(Vec3::ZERO, Vec3::Z, Vec3::Y);

        let clip = camera.view_proj().project_point3(Vec3::new(0.0, 0.0, 100.0));
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        assert!(clip.z > 0.0 && clip.z < 1.0, "Depth in [0, 1], got {}", clip.z);
    }

    #[test]
    fn test_set_projection_updates_matrices() {
        let mut camera = Camera::default();
        let before = camera.view_proj();
        camera.set_projection(Projection {
            far: 1000.0,
            ..Projection::default()
        });
        assert_ne!(camera.view_proj(), before);
        assert_eq!(camera.projection().far, 1000.0);
    }
}
