//! Square grid of terrain height samples

use crate::error::{Error, Result};
use crate::noise;

/// Fewest samples per axis that still form a cell
const MIN_DIM: usize = 2;

/// Immutable square grid of heights
///
/// Sample `(x, z)` is the height at world position `(x * scale, z * scale)`.
/// Storage is x-major: `heights[z + x * dim]`.
#[derive(Debug, Clone)]
pub struct Heightfield {
    dim: usize,
    scale: f32,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Generate a heightfield from layered noise
    ///
    /// # Arguments
    /// * `dim` - Number of samples along each axis
    /// * `scale` - World units between neighbouring samples
    pub fn generate(dim: usize, scale: f32) -> Result<Self> {
        if dim < MIN_DIM {
            return Err(Error::HeightfieldTooSmall(dim));
        }
        let mut heights = Vec::with_capacity(dim * dim);
        for x in 0..dim {
            for z in 0..dim {
                heights.push(noise::height(z as f32, x as f32));
            }
        }
        tracing::info!("Generated {}×{} heightmap", dim, dim);
        Ok(Self { dim, scale, heights })
    }

    /// Wrap existing samples (x-major, `dim * dim` values)
    pub fn from_heights(dim: usize, scale: f32, heights: Vec<f32>) -> Result<Self> {
        if dim < MIN_DIM {
            return Err(Error::HeightfieldTooSmall(dim));
        }
        let expected = dim * dim;
        if heights.len() != expected {
            return Err(Error::HeightCount {
                dim,
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self { dim, scale, heights })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Horizontal extent in world units
    pub fn size(&self) -> f32 {
        (self.dim - 1) as f32 * self.scale
    }

    /// Raw samples, x-major
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Sample at grid indices; callers keep indices inside the grid
    #[inline]
    pub fn sample(&self, x: usize, z: usize) -> f32 {
        self.heights[z + x * self.dim]
    }

    /// Bilinearly interpolated height at a world position
    ///
    /// Positions outside the grid are clamped to its border.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let last = (self.dim - 2) as f32;
        let gx = x / self.scale;
        let gz = z / self.scale;

        let cell_x = gx.floor().clamp(0.0, last);
        let cell_z = gz.floor().clamp(0.0, last);
        let tx = (gx - cell_x).clamp(0.0, 1.0);
        let tz = (gz - cell_z).clamp(0.0, 1.0);

        let ix = cell_x as usize;
        let iz = cell_z as usize;
        let h00 = self.sample(ix, iz);
        let h01 = self.sample(ix, iz + 1);
        let h10 = self.sample(ix + 1, iz);
        let h11 = self.sample(ix + 1, iz + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        near + (far - near) * tz
    }

    /// Lowest and highest sample
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }
}
