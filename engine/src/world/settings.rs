//! Terrain Settings
//!
//! Every tunable of the terrain pipeline in one serde struct. Missing keys in
//! a settings file fall back to the defaults below.
//!
//! ```json
//! {
//!     "world_size": 256,
//!     "seed": 7,
//!     "weight_decay": "half",
//!     "filters": [{ "kind": "median", "size": 3 }, { "kind": "mean", "size": 5 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::terrain::{
    FilterKind, FilterPass, MeshParams, Result, TerrainError, WeightDecay, validate_width,
};

/// Configuration for terrain generation and the walking camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Heightfield width in samples (power of two)
    pub world_size: usize,
    /// World units between grid samples
    pub world_xz_scale: f32,
    /// Height multiplier
    pub world_y_scale: f32,
    /// Texture repeats per grid cell
    pub tex_scale: f32,
    /// Diamond-square PRNG seed
    pub seed: u64,
    /// Diamond-square base displacement weight
    pub weight: f32,
    pub weight_decay: WeightDecay,
    /// Smallest diamond-square step that still gets random offsets
    pub last_displaced_step: usize,
    /// Smoothing passes, applied in order
    pub filters: Vec<FilterPass>,
    /// Eye height of the walking camera above the ground
    pub camera_height: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            world_size: 128,
            world_xz_scale: 32.0,
            world_y_scale: 1.0,
            tex_scale: 0.25,
            seed: 64,
            weight: 2000.0,
            weight_decay: WeightDecay::Sqrt2,
            last_displaced_step: 2,
            filters: vec![FilterPass {
                kind: FilterKind::Mean,
                size: 5,
            }],
            camera_height: 64.0,
        }
    }
}

impl TerrainSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::info!("Loaded terrain settings from {}", path.display());
        Ok(settings)
    }

    /// Pretty-printed JSON, e.g. to write out a template settings file.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        validate_width(self.world_size)?;
        if !(self.world_xz_scale.is_finite() && self.world_xz_scale > 0.0) {
            return Err(TerrainError::invalid(format!(
                "world_xz_scale must be positive, got {}",
                self.world_xz_scale
            )));
        }
        if !self.world_y_scale.is_finite() || !self.tex_scale.is_finite() {
            return Err(TerrainError::invalid("world_y_scale and tex_scale must be finite"));
        }
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Err(TerrainError::invalid(format!(
                "weight must be finite and non-negative, got {}",
                self.weight
            )));
        }
        if let Some(pass) = self.filters.iter().find(|p| p.size >= self.world_size) {
            return Err(TerrainError::invalid(format!(
                "{:?} filter size {} must be smaller than world_size {}",
                pass.kind, pass.size, self.world_size
            )));
        }
        if !(self.camera_height.is_finite() && self.camera_height >= 0.0) {
            return Err(TerrainError::invalid(format!(
                "camera_height must be finite and non-negative, got {}",
                self.camera_height
            )));
        }
        Ok(())
    }

    /// Mesh-building scale factors.
    pub fn mesh_params(&self) -> MeshParams {
        MeshParams {
            xz_scale: self.world_xz_scale,
            y_scale: self.world_y_scale,
            tex_scale: self.tex_scale,
        }
    }
}
