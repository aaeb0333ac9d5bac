//! World Module
//!
//! Scene-level configuration and the geometry derived from it.
//!
//! - [`settings`] - `TerrainSettings`, loaded from JSON
//! - [`water`] - sea plane at the terrain's sea level

pub mod settings;
pub mod water;

pub use settings::TerrainSettings;
pub use water::{water_surface, water_surface_for};
