//! Ground Following
//!
//! Keeps a walking camera inside the terrain and on top of its surface. This
//! is the only part of camera movement that depends on the terrain: flight,
//! mouse look and key handling live with the window loop.
//!
//! # Example
//!
//! ```ignore
//! use odyssey_engine::physics::GroundFollower;
//!
//! let follower = GroundFollower::for_terrain(settings.camera_height, terrain.mesh.sea_height);
//!
//! // Every tick, after applying movement input:
//! camera_position = follower.follow(camera_position, &terrain.mesh);
//! ```

use glam::Vec3;

use crate::terrain::TerrainMesh;

/// Clamp `x` and `z` into `[0, world_extent]` so height queries stay in bounds.
/// `y` is preserved.
pub fn clamp_to_terrain(position: Vec3, mesh: &TerrainMesh) -> Vec3 {
    let limit = mesh.world_extent();
    Vec3::new(position.x.clamp(0.0, limit), position.y, position.z.clamp(0.0, limit))
}

/// Places a walker at eye height above the terrain, never below the swim line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundFollower {
    /// Eye height above the ground
    pub eye_height: f32,
    /// Lowest allowed eye height (floating on the water)
    pub swim_height: f32,
}

impl GroundFollower {
    pub fn new(eye_height: f32, swim_height: f32) -> Self {
        Self {
            eye_height,
            swim_height,
        }
    }

    /// Swim line a third of the camera height above sea level.
    pub fn for_terrain(camera_height: f32, sea_height: f32) -> Self {
        Self::new(camera_height, sea_height + camera_height / 3.0)
    }

    /// Eye height when crouching.
    pub fn crouched(&self) -> Self {
        Self {
            eye_height: self.eye_height / 2.0,
            ..*self
        }
    }

    /// Clamp `position` into the terrain and set its height from the surface.
    pub fn follow(&self, position: Vec3, mesh: &TerrainMesh) -> Vec3 {
        let clamped = clamp_to_terrain(position, mesh);
        let ground = mesh.height_at(clamped.x, clamped.z);
        Vec3::new(clamped.x, (ground + self.eye_height).max(self.swim_height), clamped.z)
    }
}
