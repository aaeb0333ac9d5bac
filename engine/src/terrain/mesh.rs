//! Terrain Mesh Builder
//!
//! Turns a square heightfield into a regular triangulated grid: one vertex
//! per height sample, two triangles per grid cell.
//!
//! Vertex `(x, z)` sits at index `x + z * width` and maps to heightfield
//! column `x`, row `z`. Positions are kept on the CPU side after upload since
//! the height query reads them every tick.
//!
//! # Normals
//!
//! Border vertices point straight up (there is no neighbour on one side).
//! Interior vertices use the cross product of the edges from the next-row
//! neighbour `(x, z+1)` to the previous-row neighbour `(x, z-1)` and to the
//! previous-column neighbour `(x-1, z)`, normalized.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::error::{Result, TerrainError, try_filled, try_with_capacity};
use super::heightfield::{Heightfield, cell_count, validate_width};

/// Straight-up normal used along the border.
const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Scale factors applied while building the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    /// World units between neighbouring grid samples
    pub xz_scale: f32,
    /// Multiplier applied to every height
    pub y_scale: f32,
    /// Texture repeats per grid cell
    pub tex_scale: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            xz_scale: 32.0,
            y_scale: 1.0,
            tex_scale: 0.25,
        }
    }
}

/// Lowest and highest vertex height of a terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    /// Height of the water plane: one third of the way up from the lowest point.
    pub fn sea_level(&self) -> f32 {
        self.min + (self.max - self.min) / 3.0
    }

    /// Height where snow starts: one third of the way down from the highest point.
    pub fn snow_line(&self) -> f32 {
        self.max - (self.max - self.min) / 3.0
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, height: f32) -> bool {
        self.min <= height && height <= self.max
    }
}

/// Interleaved vertex layout for a single-buffer GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 32]);

/// Renderable and collidable terrain surface.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    /// Samples along one side
    pub width: usize,
    /// Scale factors the mesh was built with
    pub params: MeshParams,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle list, six indices per grid cell
    pub indices: Vec<u32>,
    pub height_range: HeightRange,
    /// Derived from `height_range` at build time
    pub sea_height: f32,
}

impl TerrainMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Side length of the terrain in world units.
    #[inline]
    pub fn world_extent(&self) -> f32 {
        (self.width - 1) as f32 * self.params.xz_scale
    }

    /// Surface height at world `(x, z)`. See [`super::height_query::height_at`].
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        super::height_query::height_at_with_width(x, z, &self.positions, self.width, self.params.xz_scale)
    }

    /// Pack positions, normals and texture coordinates into one vertex array.
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|((&position, &normal), &tex_coord)| TerrainVertex {
                position,
                normal,
                tex_coord,
            })
            .collect()
    }
}

impl Heightfield {
    /// Build a mesh from this heightfield.
    pub fn to_mesh(&self, params: &MeshParams) -> Result<TerrainMesh> {
        build_terrain_mesh(self.as_slice(), self.width(), params)
    }
}

/// Build the terrain mesh for a row-major `width x width` height array.
pub fn build_terrain_mesh(heights: &[f32], width: usize, params: &MeshParams) -> Result<TerrainMesh> {
    validate_width(width)?;
    let vertex_count = cell_count(width)?;
    if heights.len() != vertex_count {
        return Err(TerrainError::invalid(format!(
            "mesh of width {width} needs {vertex_count} heights, got {}",
            heights.len()
        )));
    }
    if u32::try_from(vertex_count).is_err() {
        return Err(TerrainError::invalid(format!(
            "width {width} has too many vertices for 32-bit indices"
        )));
    }
    if !(params.xz_scale.is_finite() && params.xz_scale > 0.0) {
        return Err(TerrainError::invalid(format!(
            "xz scale must be positive, got {}",
            params.xz_scale
        )));
    }
    if !params.y_scale.is_finite() || !params.tex_scale.is_finite() {
        return Err(TerrainError::invalid("y and texture scales must be finite"));
    }

    let index_count = (width - 1) * (width - 1) * 6;
    let mut positions = try_filled(vertex_count, [0.0f32; 3])?;
    let mut tex_coords = try_filled(vertex_count, [0.0f32; 2])?;
    let mut indices: Vec<u32> = try_with_capacity(index_count)?;
    let mut range = HeightRange {
        min: f32::MAX,
        max: f32::MIN,
    };

    for z in 0..width {
        for x in 0..width {
            let i = x + z * width;
            let y = heights[i] * params.y_scale;
            range.min = range.min.min(y);
            range.max = range.max.max(y);

            positions[i] = [x as f32 * params.xz_scale, y, z as f32 * params.xz_scale];
            tex_coords[i] = [x as f32 * params.tex_scale, z as f32 * params.tex_scale];
        }
    }

    // Cells in row-major order; winding kept identical for both triangles.
    let w = width as u32;
    for z in 0..w - 1 {
        for x in 0..w - 1 {
            let here = x + z * w;
            let below = x + (z + 1) * w;
            indices.extend_from_slice(&[here, below, here + 1, here + 1, below, below + 1]);
        }
    }

    let normals = compute_normals(&positions, width)?;
    let sea_height = range.sea_level();

    log::debug!(
        "terrain mesh: {} vertices, {} indices, heights {:.2}..{:.2}, sea {:.2}",
        vertex_count,
        indices.len(),
        range.min,
        range.max,
        sea_height
    );

    Ok(TerrainMesh {
        width,
        params: *params,
        positions,
        normals,
        tex_coords,
        indices,
        height_range: range,
        sea_height,
    })
}

fn compute_normals(positions: &[[f32; 3]], width: usize) -> Result<Vec<[f32; 3]>> {
    let mut normals = try_filled(positions.len(), UP)?;
    for z in 1..width - 1 {
        for x in 1..width - 1 {
            let i = x + z * width;
            let next_row = Vec3::from(positions[i + width]);
            let prev_row = Vec3::from(positions[i - width]);
            let prev_col = Vec3::from(positions[i - 1]);

            let normal = (prev_row - next_row).cross(prev_col - next_row);
            normals[i] = normal.normalize_or(Vec3::Y).into();
        }
    }
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::diamond_square::generate_heightfield;

    fn unit_params() -> MeshParams {
        MeshParams {
            xz_scale: 1.0,
            y_scale: 1.0,
            tex_scale: 1.0,
        }
    }

    fn is_border(x: usize, z: usize, width: usize) -> bool {
        x == 0 || z == 0 || x == width - 1 || z == width - 1
    }

    #[test]
    fn test_counts() {
        for width in [2usize, 4, 16, 64] {
            let hf = generate_heightfield(width, 64, 100.0).unwrap();
            let mesh = hf.to_mesh(&MeshParams::default()).unwrap();
            assert_eq!(mesh.vertex_count(), width * width);
            assert_eq!(mesh.normals.len(), width * width);
            assert_eq!(mesh.tex_coords.len(), width * width);
            assert_eq!(mesh.index_count(), (width - 1) * (width - 1) * 2 * 3);
        }
    }

    #[test]
    fn test_concrete_width_four() {
        let hf = generate_heightfield(4, 64, 100.0).unwrap();
        let again = generate_heightfield(4, 64, 100.0).unwrap();
        assert_eq!(hf, again);

        let mesh = build_terrain_mesh(hf.as_slice(), 4, &unit_params()).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        // 18 triangles, 54 indices
        assert_eq!(mesh.index_count(), 3 * (3 * 3 * 2));
        for z in 0..4 {
            for x in 0..4 {
                if is_border(x, z, 4) {
                    assert_eq!(mesh.normals[x + z * 4], UP);
                }
            }
        }
        assert_eq!(mesh.height_at(0.0, 0.0), hf.as_slice()[0]);
        assert_eq!(mesh.height_at(1.0, 0.0), hf.get(1, 0));
    }

    #[test]
    fn test_border_normals_point_up() {
        let width = 32;
        let hf = generate_heightfield(width, 3, 500.0).unwrap();
        let mesh = hf.to_mesh(&MeshParams::default()).unwrap();
        for z in 0..width {
            for x in 0..width {
                let n = mesh.normals[x + z * width];
                if is_border(x, z, width) {
                    assert_eq!(n, UP, "border normal at ({x}, {z})");
                } else {
                    assert!(n[1] > 0.0, "interior normal at ({x}, {z}) faces down");
                    assert!((Vec3::from(n).length() - 1.0).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_flat_interior_normals() {
        let hf = Heightfield::flat(8, 4.0).unwrap();
        let mesh = hf.to_mesh(&MeshParams::default()).unwrap();
        for n in &mesh.normals {
            assert!((Vec3::from(*n) - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_slope_normal_leans_downhill() {
        // Height rises with x, so the normal tips towards -x.
        let width = 8;
        let heights: Vec<f32> = (0..width * width).map(|i| (i % width) as f32).collect();
        let mesh = build_terrain_mesh(&heights, width, &unit_params()).unwrap();
        let n = mesh.normals[3 + 3 * width];
        assert!(n[0] < 0.0);
        assert!(n[2].abs() < 1e-6);
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((Vec3::from(n) - expected).length() < 1e-5);
    }

    #[test]
    fn test_positions_and_tex_coords() {
        let hf = generate_heightfield(8, 64, 10.0).unwrap();
        let params = MeshParams {
            xz_scale: 2.0,
            y_scale: 3.0,
            tex_scale: 0.25,
        };
        let mesh = hf.to_mesh(&params).unwrap();
        let i = 5 + 2 * 8;
        assert_eq!(mesh.positions[i], [10.0, hf.get(5, 2) * 3.0, 4.0]);
        assert_eq!(mesh.tex_coords[i], [1.25, 0.5]);
        assert_eq!(mesh.world_extent(), 14.0);
    }

    #[test]
    fn test_index_layout_and_winding() {
        let hf = Heightfield::flat(4, 0.0).unwrap();
        let mesh = hf.to_mesh(&unit_params()).unwrap();
        assert_eq!(&mesh.indices[..6], &[0, 4, 1, 1, 4, 5]);
        // Second cell of the second row
        let cell = (1 + 3) * 6;
        assert_eq!(&mesh.indices[cell..cell + 6], &[5, 9, 6, 6, 9, 10]);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));

        // Every triangle faces up (counter-clockwise seen from +y).
        for tri in mesh.indices.chunks_exact(3) {
            let a = Vec3::from(mesh.positions[tri[0] as usize]);
            let b = Vec3::from(mesh.positions[tri[1] as usize]);
            let c = Vec3::from(mesh.positions[tri[2] as usize]);
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn test_height_range() {
        let hf = generate_heightfield(64, 21, 2000.0).unwrap();
        let hf = crate::terrain::filter::smooth(hf, 5, crate::terrain::filter::FilterKind::Mean).unwrap();
        let mesh = hf.to_mesh(&unit_params()).unwrap();
        let range = mesh.height_range;
        assert!(hf.as_slice().iter().all(|&h| range.contains(h)));
        assert_eq!((range.min, range.max), hf.min_max());
        assert!(range.min <= mesh.sea_height && mesh.sea_height <= range.max);
        assert!((mesh.sea_height - (range.min + range.span() / 3.0)).abs() < 1e-3);
        assert!(range.snow_line() > mesh.sea_height);
    }

    #[test]
    fn test_y_scale_scales_range() {
        let hf = generate_heightfield(16, 2, 100.0).unwrap();
        let params = MeshParams {
            y_scale: 2.0,
            ..unit_params()
        };
        let mesh = hf.to_mesh(&params).unwrap();
        let (lo, hi) = hf.min_max();
        assert_eq!(mesh.height_range.min, lo * 2.0);
        assert_eq!(mesh.height_range.max, hi * 2.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(build_terrain_mesh(&[0.0; 15], 4, &unit_params()).is_err());
        assert!(build_terrain_mesh(&[0.0; 9], 3, &unit_params()).is_err());
        let zero_scale = MeshParams {
            xz_scale: 0.0,
            ..unit_params()
        };
        assert!(build_terrain_mesh(&[0.0; 16], 4, &zero_scale).is_err());
    }

    #[test]
    fn test_interleaved_matches_arrays() {
        let hf = generate_heightfield(8, 64, 10.0).unwrap();
        let mesh = hf.to_mesh(&MeshParams::default()).unwrap();
        let verts = mesh.interleaved();
        assert_eq!(verts.len(), mesh.vertex_count());
        assert_eq!(verts[9].position, mesh.positions[9]);
        assert_eq!(verts[9].normal, mesh.normals[9]);
        assert_eq!(verts[9].tex_coord, mesh.tex_coords[9]);
        assert_eq!(bytemuck::cast_slice::<TerrainVertex, u8>(&verts).len(), verts.len() * 32);
    }
}
