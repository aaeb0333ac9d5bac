//! Terrain Height Query
//!
//! Surface height at an arbitrary world `(x, z)`, read back from the mesh's
//! CPU-side vertex positions. Called once per simulation tick by the walking
//! camera.
//!
//! The lookup interpolates over ONE triangle of the grid cell, the one
//! spanned by corners `(x, z)`, `(x+1, z)` and `(x, z+1)`:
//!
//! ```text
//! y = y00 + fx * (y10 - y00) + fz * (y01 - y00)
//! ```
//!
//! This is exact on that half of the cell and at every grid point, and only
//! approximate on the other half (the `(x+1, z+1)` corner is never read). The
//! camera's ground-follow feel was tuned against this, so it is kept as is.
//!
//! No clamping happens here: callers keep `(x, z)` inside
//! `[0, (width - 1) * xz_scale]` (see [`crate::physics::clamp_to_terrain`]).

/// Surface height at world `(x, z)` for a square grid of `positions`.
///
/// The grid width is recovered from `positions.len()`.
///
/// # Panics
///
/// Panics if `(x, z)` lies beyond the far edge of the grid.
pub fn height_at(x: f32, z: f32, positions: &[[f32; 3]], xz_scale: f32) -> f32 {
    let width = positions.len().isqrt();
    height_at_with_width(x, z, positions, width, xz_scale)
}

/// [`height_at`] with the grid width already known.
#[inline]
pub fn height_at_with_width(x: f32, z: f32, positions: &[[f32; 3]], width: usize, xz_scale: f32) -> f32 {
    let gx = x / xz_scale;
    let gz = z / xz_scale;
    let tile_x = gx.floor();
    let tile_z = gz.floor();
    let fx = gx - tile_x;
    let fz = gz - tile_z;

    let tx = tile_x as usize;
    let tz = tile_z as usize;
    // Neighbours wrap so the far edge itself can be queried; their weight is 0 there.
    let tx1 = (tx + 1) % width;
    let tz1 = (tz + 1) % width;

    let y00 = positions[tx + tz * width][1];
    let y10 = positions[tx1 + tz * width][1];
    let y01 = positions[tx + tz1 * width][1];

    y00 + fx * (y10 - y00) + fz * (y01 - y00)
}
