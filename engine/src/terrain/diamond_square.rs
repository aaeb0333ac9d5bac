//! Diamond-Square Heightfield Generator
//!
//! Fractal midpoint displacement on a `2^n x 2^n` grid. Because the grid is
//! `2^n` wide rather than `2^n + 1`, every neighbour lookup wraps around
//! (modulo `width`) and the grid behaves like a torus: cell (0,0) doubles as
//! all four corners of the first square. The right and bottom edges are
//! therefore not matched to the left and top edges, which can show as a seam
//! unless the map is tiled.
//!
//! # Step Schedule
//!
//! For `step = width, width/2, ..., 2`:
//! 1. decay the weight, then run the diamond phase (centre of every
//!    `step x step` square = mean of its 4 corners + offset)
//! 2. decay the weight, then run the square phase (top and left edge midpoint
//!    of every square = mean of its 4 neighbours + offset)
//!
//! Offsets are uniform in `[-weight, +weight]` and are only added while
//! `step >= last_displaced_step`.
//!
//! # Example
//!
//! ```ignore
//! use odyssey_engine::terrain::{DiamondSquare, WeightDecay};
//!
//! let heights = DiamondSquare::new(128, 64, 2000.0)
//!     .with_decay(WeightDecay::Half)
//!     .generate()?;
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::error::{Result, TerrainError, try_filled};
use super::heightfield::{Heightfield, cell_count, validate_width};

/// How the random displacement weight shrinks between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDecay {
    /// Divide by sqrt(2) per phase (amplitude halves per octave). Rough,
    /// mountainous terrain.
    #[default]
    Sqrt2,
    /// Divide by 2 per phase (amplitude quarters per octave). Smooth, rolling
    /// terrain.
    Half,
}

impl WeightDecay {
    #[inline]
    fn apply(self, weight: f32) -> f32 {
        match self {
            WeightDecay::Sqrt2 => weight / std::f32::consts::SQRT_2,
            WeightDecay::Half => weight / 2.0,
        }
    }
}

/// Diamond-square generator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondSquare {
    /// Heightfield width, power of two >= 2
    pub width: usize,
    /// PRNG seed
    pub seed: u64,
    /// Displacement range for the first cell
    pub base_weight: f32,
    /// Weight decay between phases
    pub decay: WeightDecay,
    /// Smallest step length that still receives random offsets
    pub last_displaced_step: usize,
}

impl DiamondSquare {
    /// Generator with default decay that displaces every step.
    pub fn new(width: usize, seed: u64, base_weight: f32) -> Self {
        Self {
            width,
            seed,
            base_weight,
            decay: WeightDecay::default(),
            last_displaced_step: 2,
        }
    }

    pub fn with_decay(mut self, decay: WeightDecay) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_last_displaced_step(mut self, step: usize) -> Self {
        self.last_displaced_step = step;
        self
    }

    /// Run the algorithm and return the `width x width` heightfield.
    pub fn generate(&self) -> Result<Heightfield> {
        validate_width(self.width)?;
        if !self.base_weight.is_finite() || self.base_weight < 0.0 {
            return Err(TerrainError::invalid(format!(
                "base weight must be finite and non-negative, got {}",
                self.base_weight
            )));
        }

        log::debug!(
            "diamond-square: width={} seed={} weight={} decay={:?} last_displaced_step={}",
            self.width,
            self.seed,
            self.base_weight,
            self.decay,
            self.last_displaced_step
        );

        let width = self.width;
        let mut map = try_filled(cell_count(width)?, 0.0f32)?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut weight = self.base_weight;

        map[0] = offset(&mut rng, weight);

        let mut step = width;
        while step > 1 {
            let displace = step >= self.last_displaced_step;

            weight = self.decay.apply(weight);
            diamond_phase(&mut map, width, step, weight, displace, &mut rng);

            weight = self.decay.apply(weight);
            square_phase(&mut map, width, step, weight, displace, &mut rng);

            step /= 2;
        }

        Heightfield::new(width, map)
    }
}

/// Generate a heightfield with the default decay and full displacement.
pub fn generate_heightfield(width: usize, seed: u64, base_weight: f32) -> Result<Heightfield> {
    DiamondSquare::new(width, seed, base_weight).generate()
}

#[inline]
fn offset(rng: &mut ChaCha8Rng, weight: f32) -> f32 {
    weight * rng.gen_range(-1.0f32..=1.0)
}

// ============================================================================
// Phases
// ============================================================================

/// Centre of each `step` square = mean of its four (wrapped) corners.
fn diamond_phase(
    map: &mut [f32],
    width: usize,
    step: usize,
    weight: f32,
    displace: bool,
    rng: &mut ChaCha8Rng,
) {
    let half = step / 2;
    for row in (0..width).step_by(step) {
        let next_row = (row + step) % width;
        for col in (0..width).step_by(step) {
            let next_col = (col + step) % width;
            let mean = (map[row * width + col]
                + map[row * width + next_col]
                + map[next_row * width + col]
                + map[next_row * width + next_col])
                / 4.0;

            let mid = (row + half) * width + col + half;
            map[mid] = mean;
            if displace {
                map[mid] += offset(rng, weight);
            }
        }
    }
}

#[inline]
fn wrapped(map: &[f32], width: usize, row: usize, col: usize) -> f32 {
    map[(row % width) * width + col % width]
}

/// Top and left edge midpoints of each `step` square. Every edge in the
/// wrapped grid is the top or left edge of exactly one square.
fn square_phase(
    map: &mut [f32],
    width: usize,
    step: usize,
    weight: f32,
    displace: bool,
    rng: &mut ChaCha8Rng,
) {
    let half = step / 2;
    for row in (0..width).step_by(step) {
        for col in (0..width).step_by(step) {
            let mid_row = row + half;
            let mid_col = col + half;

            let mean_up = (wrapped(map, width, row + width - half, mid_col)
                + wrapped(map, width, row, mid_col + width - half)
                + wrapped(map, width, row, mid_col + half)
                + wrapped(map, width, mid_row, mid_col))
                / 4.0;
            let mean_left = (wrapped(map, width, mid_row + width - half, col)
                + wrapped(map, width, mid_row, col + width - half)
                + wrapped(map, width, mid_row, mid_col)
                + wrapped(map, width, mid_row + half, col))
                / 4.0;

            let up = row * width + mid_col;
            let left = mid_row * width + col;
            map[up] = mean_up;
            map[left] = mean_left;
            if displace {
                map[up] += offset(rng, weight);
                map[left] += offset(rng, weight);
            }
        }
    }
}
