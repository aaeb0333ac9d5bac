//! Odyssey Engine Library
//!
//! CPU side of a terrain-exploration demo: a diamond-square heightfield,
//! smoothed and turned into a renderable, collidable grid mesh, plus the
//! ground query the walking camera uses every tick.
//!
//! # Modules
//!
//! - [`terrain`] - heightfield generation, smoothing filters, mesh building, height query
//! - [`world`] - terrain settings and the water plane
//! - [`physics`] - keeping the camera inside the map and on the ground
//!
//! # Example
//!
//! ```ignore
//! use odyssey_engine::{GroundFollower, Terrain, TerrainSettings};
//!
//! let settings = TerrainSettings::default();
//! let terrain = Terrain::generate(&settings)?;
//!
//! // Upload terrain.mesh.interleaved() and terrain.mesh.indices to the GPU...
//!
//! let follower = GroundFollower::for_terrain(settings.camera_height, terrain.mesh.sea_height);
//! let mut eye = terrain.spawn_point();
//! eye = follower.follow(eye, &terrain.mesh);
//! ```

pub mod physics;
pub mod terrain;
pub mod world;

// Re-export the main entry points at crate level
pub use physics::{GroundFollower, clamp_to_terrain};
pub use terrain::{
    FilterKind, FilterPass, HeightRange, Heightfield, MeshParams, Terrain, TerrainError,
    TerrainMesh, TerrainVertex, WeightDecay, build_terrain_mesh, generate_heightfield, height_at,
    smooth,
};
pub use world::{TerrainSettings, water_surface};
