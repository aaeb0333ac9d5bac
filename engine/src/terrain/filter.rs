//! Heightfield Smoothing Filters
//!
//! Diamond-square output has sharp single-cell spikes and visible creases
//! along the coarse step grid. Two filters tame it:
//!
//! - [`mean_filter`]: separable moving average, horizontal pass then vertical
//!   pass, neighbour at distance `d` weighted `1 / 2^d`
//! - [`median_filter`]: median of the cross-shaped neighbourhood (the cell
//!   plus `size/2` cells left, right, up and down)
//!
//! Both wrap around the edges, matching the toroidal generator. Neither
//! reads from the buffer it is writing.

use serde::{Deserialize, Serialize};

use super::error::{Result, TerrainError, try_filled, try_with_capacity};
use super::heightfield::Heightfield;

/// Which smoothing filter to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Mean,
    Median,
}

/// One smoothing pass as listed in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPass {
    pub kind: FilterKind,
    /// Filter length; `size / 2` neighbours are used on each side.
    pub size: usize,
}

impl FilterPass {
    pub fn apply(&self, heightfield: &mut Heightfield) -> Result<()> {
        match self.kind {
            FilterKind::Mean => mean_filter(heightfield, self.size),
            FilterKind::Median => median_filter(heightfield, self.size),
        }
    }
}

/// Smooth `heightfield` with the chosen filter and hand it back.
pub fn smooth(mut heightfield: Heightfield, size: usize, kind: FilterKind) -> Result<Heightfield> {
    FilterPass { kind, size }.apply(&mut heightfield)?;
    Ok(heightfield)
}

fn check_size(heightfield: &Heightfield, size: usize) -> Result<usize> {
    if size >= heightfield.width() {
        return Err(TerrainError::invalid(format!(
            "filter size {size} must be smaller than heightfield width {}",
            heightfield.width()
        )));
    }
    Ok(size / 2)
}

/// Two-pass weighted moving average with wrap-around.
pub fn mean_filter(heightfield: &mut Heightfield, size: usize) -> Result<()> {
    let radius = check_size(heightfield, size)?;
    if radius == 0 {
        return Ok(());
    }

    let width = heightfield.width();
    let weights: Vec<f32> = (1..=radius).map(|d| 0.5f32.powi(d as i32)).collect();
    let normalization = 1.0 + 2.0 * weights.iter().sum::<f32>();

    let mut tmp = try_filled(width * width, 0.0f32)?;
    let heights = heightfield.as_mut_slice();

    // Horizontal
    for row in 0..width {
        let line = row * width;
        for col in 0..width {
            let mut sum = heights[line + col];
            for (d, &w) in (1..=radius).zip(&weights) {
                let left = (col + width - d) % width;
                let right = (col + d) % width;
                sum += (heights[line + left] + heights[line + right]) * w;
            }
            tmp[line + col] = sum / normalization;
        }
    }

    // Vertical
    for col in 0..width {
        for row in 0..width {
            let mut sum = tmp[row * width + col];
            for (d, &w) in (1..=radius).zip(&weights) {
                let up = (row + width - d) % width;
                let down = (row + d) % width;
                sum += (tmp[up * width + col] + tmp[down * width + col]) * w;
            }
            heights[row * width + col] = sum / normalization;
        }
    }

    Ok(())
}

/// Cross-shaped median filter with wrap-around. Removes one-cell spikes while
/// keeping features wider than `size / 2`.
pub fn median_filter(heightfield: &mut Heightfield, size: usize) -> Result<()> {
    let radius = check_size(heightfield, size)?;
    if radius == 0 {
        return Ok(());
    }

    let width = heightfield.width();
    let src = heightfield.as_slice();
    let mut out = try_filled(width * width, 0.0f32)?;
    let mut window: Vec<f32> = try_with_capacity(4 * radius + 1)?;

    for row in 0..width {
        for col in 0..width {
            window.clear();
            window.push(src[row * width + col]);
            for d in 1..=radius {
                window.push(src[row * width + (col + width - d) % width]);
                window.push(src[row * width + (col + d) % width]);
                window.push(src[((row + width - d) % width) * width + col]);
                window.push(src[((row + d) % width) * width + col]);
            }
            let mid = window.len() / 2;
            let (_, median, _) = window.select_nth_unstable_by(mid, f32::total_cmp);
            out[row * width + col] = *median;
        }
    }

    heightfield.as_mut_slice().copy_from_slice(&out);
    Ok(())
}
