//! View frustum planes and box classification
//!
//! Planes are pulled straight out of a combined view-projection matrix by
//! adding and subtracting its rows. Matrices follow the glam convention
//! (`clip = m * p`) with a `[0, 1]` depth range, as produced by
//! `Mat4::perspective_lh` and `Mat4::orthographic_lh`.

use glam::{Mat4, Vec3, Vec4};
use hovercraft_physics::Aabb;

/// Plane `normal · p + d = 0` with the normal pointing into the frustum
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            normal: v.truncate(),
            d: v.w,
        }
    }

    /// Signed distance, scaled by the normal length unless normalized
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Plane with a unit-length normal
    pub fn normalized(&self) -> Self {
        let length = self.normal.length();
        if length > 0.0 {
            Self {
                normal: self.normal / length,
                d: self.d / length,
            }
        } else {
            *self
        }
    }
}

/// Result of testing a box against the frustum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intersection {
    Outside,
    Intersecting,
    Inside,
}

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const TOP: usize = 2;
pub const BOTTOM: usize = 3;
pub const NEAR: usize = 4;
pub const FAR: usize = 5;

/// Six clip planes of a camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of a view-projection matrix
    ///
    /// # Arguments
    /// * `view_proj` - Combined `projection * view` matrix
    /// * `normalize` - Scale planes to unit normals; culling only needs signs
    pub fn extract(view_proj: &Mat4, normalize: bool) -> Self {
        let r0 = view_proj.row(0);
        let r1 = view_proj.row(1);
        let r2 = view_proj.row(2);
        let r3 = view_proj.row(3);

        let mut planes = [
            Plane::from_vec4(r3 + r0),
            Plane::from_vec4(r3 - r0),
            Plane::from_vec4(r3 - r1),
            Plane::from_vec4(r3 + r1),
            Plane::from_vec4(r2),
            Plane::from_vec4(r3 - r2),
        ];

        if normalize {
            for plane in &mut planes {
                *plane = plane.normalized();
            }
        }

        Self { planes }
    }

    /// True if the point is on the inner side of every plane
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(point) >= 0.0)
    }

    /// Classify a box against all six planes
    ///
    /// A box is outside as soon as its corner furthest along one plane's
    /// normal is behind that plane. It is intersecting if, for some plane, its
    /// corner furthest against the normal is on or behind the plane.
    pub fn classify(&self, aabb: &Aabb) -> Intersection {
        let mut result = Intersection::Inside;
        for plane in &self.planes {
            if plane.distance(aabb.positive_vertex(plane.normal)) < 0.0 {
                return Intersection::Outside;
            }
            if plane.distance(aabb.negative_vertex(plane.normal)) <= 0.0 {
                result = Intersection::Intersecting;
            }
        }
        result
    }
}
