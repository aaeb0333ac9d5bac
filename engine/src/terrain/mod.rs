//! Terrain Module
//!
//! Procedural terrain synthesis, run once at startup:
//!
//! ```text
//! diamond_square -> filter (mean / median passes) -> mesh -> GPU upload (external)
//!                                                      \-> height_query (every tick)
//! ```
//!
//! Everything here is plain CPU data in, plain CPU data out. Nothing depends
//! on the window, the renderer or the settings file format.

pub mod diamond_square;
pub mod error;
pub mod export;
pub mod filter;
pub mod height_query;
pub mod heightfield;
pub mod mesh;

use std::time::Instant;

pub use diamond_square::{DiamondSquare, WeightDecay, generate_heightfield};
pub use error::{Result, TerrainError};
pub use export::{MeshDump, MeshDumpHeader, load_mesh_dump, read_mesh_dump, save_mesh_dump, write_mesh_dump};
pub use filter::{FilterKind, FilterPass, mean_filter, median_filter, smooth};
pub use height_query::{height_at, height_at_with_width};
pub use heightfield::{Heightfield, validate_width};
pub use mesh::{HeightRange, MeshParams, TerrainMesh, TerrainVertex, build_terrain_mesh};

use crate::world::TerrainSettings;

/// Generated terrain, ready for upload and height queries.
#[derive(Debug, Clone)]
pub struct Terrain {
    pub mesh: TerrainMesh,
}

impl Terrain {
    /// Run the full pipeline: generate, smooth, build the mesh.
    pub fn generate(settings: &TerrainSettings) -> Result<Self> {
        settings.validate()?;
        let started = Instant::now();

        let heightfield = generate_heightmap(settings)?;
        let mesh = heightfield.to_mesh(&settings.mesh_params())?;
        log::info!(
            "Terrain {}x{} ready in {:.2}ms: heights {:.1}..{:.1}, sea level {:.1}",
            settings.world_size,
            settings.world_size,
            started.elapsed().as_secs_f64() * 1000.0,
            mesh.height_range.min,
            mesh.height_range.max,
            mesh.sea_height
        );

        Ok(Self { mesh })
    }

    /// Grid samples along one side.
    #[inline]
    pub fn world_size(&self) -> usize {
        self.mesh.width
    }

    /// World units between grid samples.
    #[inline]
    pub fn world_xz_scale(&self) -> f32 {
        self.mesh.params.xz_scale
    }

    /// Surface height at world `(x, z)`.
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.mesh.height_at(x, z)
    }

    /// Centre of the map at the highest terrain point.
    pub fn spawn_point(&self) -> glam::Vec3 {
        let centre = self.world_size() as f32 * self.world_xz_scale() / 2.0;
        glam::Vec3::new(centre, self.mesh.height_range.max, centre)
    }
}

/// Diamond-square followed by the configured smoothing passes.
pub fn generate_heightmap(settings: &TerrainSettings) -> Result<Heightfield> {
    let started = Instant::now();
    let mut heightfield = DiamondSquare::new(settings.world_size, settings.seed, settings.weight)
        .with_decay(settings.weight_decay)
        .with_last_displaced_step(settings.last_displaced_step)
        .generate()?;
    log::info!(
        "diamond-square {}x{}: {:.2}ms",
        settings.world_size,
        settings.world_size,
        started.elapsed().as_secs_f64() * 1000.0
    );

    for pass in &settings.filters {
        let started = Instant::now();
        pass.apply(&mut heightfield)?;
        log::info!(
            "{:?} filter (size {}): {:.2}ms",
            pass.kind,
            pass.size,
            started.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(heightfield)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> TerrainSettings {
        TerrainSettings {
            world_size: 32,
            world_xz_scale: 4.0,
            ..TerrainSettings::default()
        }
    }

    #[test]
    fn test_pipeline_matches_manual_steps() {
        let settings = small_settings();
        let terrain = Terrain::generate(&settings).unwrap();

        let raw = generate_heightfield(32, settings.seed, settings.weight).unwrap();
        let smoothed = smooth(raw, 5, FilterKind::Mean).unwrap();
        let mesh = smoothed.to_mesh(&settings.mesh_params()).unwrap();

        assert_eq!(terrain.mesh.positions, mesh.positions);
        assert_eq!(terrain.mesh.indices, mesh.indices);
        assert_eq!(terrain.mesh.sea_height, mesh.sea_height);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let settings = small_settings();
        let a = Terrain::generate(&settings).unwrap();
        let b = Terrain::generate(&settings).unwrap();
        assert_eq!(a.mesh.positions, b.mesh.positions);
        assert_eq!(a.mesh.normals, b.mesh.normals);
    }

    #[test]
    fn test_filters_run_in_order() {
        let mut settings = small_settings();
        settings.filters = vec![
            FilterPass {
                kind: FilterKind::Median,
                size: 3,
            },
            FilterPass {
                kind: FilterKind::Mean,
                size: 5,
            },
        ];
        let heightfield = generate_heightmap(&settings).unwrap();

        let mut expected = generate_heightfield(32, settings.seed, settings.weight).unwrap();
        median_filter(&mut expected, 3).unwrap();
        mean_filter(&mut expected, 5).unwrap();
        assert_eq!(heightfield, expected);
    }

    #[test]
    fn test_invalid_settings_fail_before_work() {
        let settings = TerrainSettings {
            world_size: 48,
            ..TerrainSettings::default()
        };
        assert!(matches!(Terrain::generate(&settings), Err(TerrainError::InvalidArgument(_))));
    }

    #[test]
    fn test_spawn_point() {
        let terrain = Terrain::generate(&small_settings()).unwrap();
        let spawn = terrain.spawn_point();
        assert_eq!(spawn.x, 64.0);
        assert_eq!(spawn.z, 64.0);
        assert_eq!(spawn.y, terrain.mesh.height_range.max);
        assert_eq!(terrain.world_size(), 32);
        assert_eq!(terrain.world_xz_scale(), 4.0);
        assert_eq!(terrain.height_at(8.0, 12.0), terrain.mesh.positions[2 + 3 * 32][1]);
    }
}
