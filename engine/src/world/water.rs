//! Water Surface
//!
//! Flat sea plane covering the whole terrain at sea level. The animated
//! waves are done in the water shader; the CPU side only provides the quad.

use crate::terrain::TerrainMesh;

/// Two triangles covering `[0, extent] x [0, extent]` at `y = sea_height`,
/// wound to face up like the terrain.
pub fn water_surface(sea_height: f32, extent: f32) -> [[f32; 3]; 6] {
    [
        [0.0, sea_height, 0.0],
        [0.0, sea_height, extent],
        [extent, sea_height, 0.0],
        [extent, sea_height, 0.0],
        [0.0, sea_height, extent],
        [extent, sea_height, extent],
    ]
}

/// Water quad for a built terrain.
pub fn water_surface_for(mesh: &TerrainMesh) -> [[f32; 3]; 6] {
    water_surface(mesh.sea_height, mesh.world_extent())
}
