//! Physics Module
//!
//! Terrain collision for the walking camera. The only collision the demo
//! needs is "stand on the heightfield", answered by the terrain height query.
//!
//! **1 unit = 1 world unit of the terrain grid** (`world_xz_scale` units per
//! grid cell).
//!
//! - [`ground`] - bounds clamping and ground following

pub mod ground;

pub use ground::{GroundFollower, clamp_to_terrain};
