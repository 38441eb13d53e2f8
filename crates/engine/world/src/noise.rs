//! Hash-based value noise for terrain heights
//!
//! Integer lattice values come from a bit-mixing hash, are smoothed over
//! their 3×3 neighbourhood and cosine-interpolated between lattice points.
//! Three octaves are summed into the final height. Everything is a pure
//! function of the input coordinates.

use std::f32::consts::PI;

/// (frequency, amplitude) of each octave, lowest frequency first
pub const OCTAVES: [(f32, f32); 3] = [(0.05, 60.0), (0.1, 80.0), (0.5, 5.0)];

/// Pseudo-random value in `[-1, 1]` for an integer lattice point
pub fn lattice(x: i32, y: i32) -> f32 {
    let n = x.wrapping_add(y.wrapping_mul(57));
    let n = (n << 13) ^ n;
    let mixed = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - mixed as f32 / 1_073_741_824.0
}

/// Lattice value averaged with its neighbours
///
/// Corners weigh 1/16 each, sides 1/8 and the centre 1/4.
pub fn smoothed(x: i32, y: i32) -> f32 {
    let corners = (lattice(x - 1, y - 1)
        + lattice(x + 1, y - 1)
        + lattice(x - 1, y + 1)
        + lattice(x + 1, y + 1))
        / 16.0;
    let sides = (lattice(x - 1, y) + lattice(x + 1, y) + lattice(x, y - 1) + lattice(x, y + 1)) / 8.0;
    let centre = lattice(x, y) / 4.0;
    corners + sides + centre
}

/// Cosine interpolation between `a` and `b`
pub fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

/// Continuous noise at fractional coordinates
///
/// Coordinates are truncated toward zero to find the lattice cell.
pub fn interpolated(x: f32, y: f32) -> f32 {
    let ix = x as i32;
    let iy = y as i32;
    let fx = x - ix as f32;
    let fy = y - iy as f32;

    let top = cosine_interpolate(smoothed(ix, iy), smoothed(ix + 1, iy), fx);
    let bottom = cosine_interpolate(smoothed(ix, iy + 1), smoothed(ix + 1, iy + 1), fx);
    cosine_interpolate(top, bottom, fy)
}

/// Terrain height at grid coordinates, summed over [`OCTAVES`]
pub fn height(x: f32, y: f32) -> f32 {
    OCTAVES
        .iter()
        .map(|&(frequency, amplitude)| interpolated(x * frequency, y * frequency) * amplitude)
        .sum()
}
