//! Heightfield
//!
//! Square grid of elevations stored row-major in a flat vector. The width is
//! always a power of two (>= 2) so that the diamond-square wrap-around indexing
//! tiles exactly.

use super::error::{Result, TerrainError, try_filled};

/// Check that `width` is a usable heightfield width.
pub fn validate_width(width: usize) -> Result<()> {
    if width < 2 || !width.is_power_of_two() {
        return Err(TerrainError::invalid(format!(
            "heightfield width must be a power of two >= 2, got {width}"
        )));
    }
    Ok(())
}

/// `width * width`, failing instead of overflowing.
pub(crate) fn cell_count(width: usize) -> Result<usize> {
    width
        .checked_mul(width)
        .ok_or_else(|| TerrainError::invalid(format!("width {width} overflows cell count")))
}

/// A square `width x width` grid of heights.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    width: usize,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Wrap existing row-major data. `heights.len()` must equal `width * width`.
    pub fn new(width: usize, heights: Vec<f32>) -> Result<Self> {
        validate_width(width)?;
        let expected = cell_count(width)?;
        if heights.len() != expected {
            return Err(TerrainError::invalid(format!(
                "heightfield of width {width} needs {expected} values, got {}",
                heights.len()
            )));
        }
        Ok(Self { width, heights })
    }

    /// A heightfield with every cell set to `value`.
    pub fn flat(width: usize, value: f32) -> Result<Self> {
        validate_width(width)?;
        let heights = try_filled(cell_count(width)?, value)?;
        Ok(Self { width, heights })
    }

    /// Number of samples along one side.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height at column `col`, row `row`.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.heights[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        self.heights[row * self.width + col] = value;
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.heights
    }

    /// Lowest and highest value in the grid.
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Largest absolute difference between two horizontally or vertically
    /// adjacent cells. Wrap-around pairs at the edges count too.
    pub fn max_neighbor_delta(&self) -> f32 {
        let w = self.width;
        let mut max_delta = 0.0f32;
        for row in 0..w {
            for col in 0..w {
                let h = self.get(col, row);
                max_delta = max_delta
                    .max((h - self.get((col + 1) % w, row)).abs())
                    .max((h - self.get(col, (row + 1) % w)).abs());
            }
        }
        max_delta
    }
}
