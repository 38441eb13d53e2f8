//! Terrain elevation queries
//!
//! The integrator only needs two things from the ground it hovers over: the
//! height below a world-space (x, z) position and the horizontal extent used
//! for the boundary clamp.

/// Trait for terrain height sources
///
/// Implemented by the generated terrain and by [`FlatGround`] for tests and
/// headless tools.
pub trait HeightField {
    /// Height of the surface below world position (x, z)
    ///
    /// Positions outside the field are clamped to its border rather than
    /// failing.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Horizontal extent of the field along both x and z
    ///
    /// The field covers `[0, size]` on each axis.
    fn size(&self) -> f32;
}

/// Perfectly flat ground at a fixed elevation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    /// Elevation of the surface
    pub height: f32,
    /// Horizontal extent
    pub size: f32,
}

impl FlatGround {
    pub fn new(height: f32, size: f32) -> Self {
        Self { height, size }
    }
}

impl HeightField for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn size(&self) -> f32 {
        self.size
    }
}

impl<T: HeightField + ?Sized> HeightField for &T {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }

    fn size(&self) -> f32 {
        (**self).size()
    }
}
