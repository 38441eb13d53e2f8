//! Collision primitives
//!
//! Axis-aligned boxes used by the terrain quadtree and the fixed grid of
//! underside sample points used by the vehicle contact model.

use glam::Vec3;

/// Axis-Aligned Bounding Box using glam types
///
/// Represents a box aligned to the world coordinate axes. All corners are axis-aligned,
/// making plane and overlap tests simple min/max comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    ///
    /// # Arguments
    /// * `min` - Minimum corner (smallest x, y, z values)
    /// * `max` - Maximum corner (largest x, y, z values)
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Calculate the center point of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculate the size (extents) of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Calculate the half-size (half-extents) of the AABB
    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside the AABB
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if another AABB lies inside this one in the horizontal (x/z) plane
    pub fn contains_xz(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.z >= self.min.z
            && other.max.z <= self.max.z
    }

    /// Test intersection with another AABB
    ///
    /// # Returns
    /// `true` if the AABBs overlap (including touching at edges/faces)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Create an AABB that encompasses both AABBs
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Corner of the box furthest along `normal`
    ///
    /// Each axis picks `max` where the normal component is non-negative and
    /// `min` otherwise.
    pub fn positive_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.max.x } else { self.min.x },
            if normal.y >= 0.0 { self.max.y } else { self.min.y },
            if normal.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Corner of the box furthest against `normal`
    pub fn negative_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.min.x } else { self.max.x },
            if normal.y >= 0.0 { self.min.y } else { self.max.y },
            if normal.z >= 0.0 { self.min.z } else { self.max.z },
        )
    }
}

/// Number of contact samples along each horizontal edge of the body
pub const POINTS_PER_EDGE: usize = 3;

/// Total number of contact samples on the underside of the body
pub const POINT_COUNT: usize = POINTS_PER_EDGE * POINTS_PER_EDGE;

/// Fixed 3×3 grid of body-space sample points on the underside of a box
///
/// Each sample carries two vectors:
/// - `points`: the sample location relative to the body centre
/// - `offsets`: the lever arm used for the angular hover response, pointing
///   from the sample back towards the body centre
///
/// Samples are ordered with the x index outermost and the z index innermost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionGrid {
    /// Body-space sample positions
    pub points: [Vec3; POINT_COUNT],
    /// Body-space lever arms for the angular response
    pub offsets: [Vec3; POINT_COUNT],
}

impl CollisionGrid {
    /// Build the grid for a box of the given dimensions
    ///
    /// Samples are spaced `size.x / 2` and `size.z / 2` apart so that the
    /// outer rows sit on the box edges, and lie at `-size.y / 2` (the underside).
    ///
    /// # Arguments
    /// * `size` - Full box dimensions (width, height, length)
    pub fn from_box(size: Vec3) -> Self {
        let half = size * 0.5;
        let step_x = size.x / (POINTS_PER_EDGE - 1) as f32;
        let step_z = size.z / (POINTS_PER_EDGE - 1) as f32;

        let mut points = [Vec3::ZERO; POINT_COUNT];
        let mut offsets = [Vec3::ZERO; POINT_COUNT];
        for x in 0..POINTS_PER_EDGE {
            for z in 0..POINTS_PER_EDGE {
                let index = x * POINTS_PER_EDGE + z;
                let fx = x as f32 * step_x;
                let fz = z as f32 * step_z;
                points[index] = Vec3::new(fx - half.x, -half.y, fz - half.z);
                offsets[index] = Vec3::new(half.x - fx, half.y, half.z - fz);
            }
        }

        Self { points, offsets }
    }

    /// Iterate over (point, offset) pairs in sample order
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.points.iter().copied().zip(self.offsets.iter().copied())
    }

    /// Bounding box enclosing every sample point
    pub fn bounds(&self) -> Aabb {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for point in self.points {
            min = min.min(point);
            max = max.max(point);
        }
        Aabb::new(min, max)
    }
}
