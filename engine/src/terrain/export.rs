//! Terrain Mesh Dump (.otmesh)
//!
//! Binary hand-off format for an external GPU-upload or viewer step.
//! Layout: fixed 32-byte header | interleaved vertex data | u32 index data.
//!
//! Geometry is written as raw little-endian bytes straight from the
//! `#[repr(C)]` structs, so a reader can memcpy it into vertex and index
//! buffers unchanged.

use std::io::Write;
use std::path::Path;

use bytemuck::{Pod, Zeroable};

use super::error::{Result, TerrainError};
use super::heightfield::{cell_count, validate_width};
use super::mesh::{TerrainMesh, TerrainVertex};

/// Magic bytes identifying a mesh dump.
pub const MESH_DUMP_MAGIC: [u8; 4] = *b"OTMS";

/// Current dump format version.
const MESH_DUMP_VERSION: u32 = 1;

/// Size of the header in bytes.
const HEADER_SIZE: usize = 32;

/// Fixed-size header at the start of a mesh dump.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshDumpHeader {
    /// Always `b"OTMS"`
    pub magic: [u8; 4],
    pub version: u32,
    /// Grid samples along one side
    pub width: u32,
    pub vertex_count: u32,
    pub index_count: u32,
    pub min_height: f32,
    pub max_height: f32,
    pub sea_height: f32,
}

static_assertions::assert_eq_size!(MeshDumpHeader, [u8; HEADER_SIZE]);

/// Geometry read back from a dump.
#[derive(Debug, Clone)]
pub struct MeshDump {
    pub header: MeshDumpHeader,
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

/// Serialize `mesh` into `out`.
pub fn write_mesh_dump<W: Write>(out: &mut W, mesh: &TerrainMesh) -> Result<()> {
    let header = MeshDumpHeader {
        magic: MESH_DUMP_MAGIC,
        version: MESH_DUMP_VERSION,
        width: mesh.width as u32,
        vertex_count: mesh.vertex_count() as u32,
        index_count: mesh.index_count() as u32,
        min_height: mesh.height_range.min,
        max_height: mesh.height_range.max,
        sea_height: mesh.sea_height,
    };

    let vertices = mesh.interleaved();
    out.write_all(bytemuck::bytes_of(&header))?;
    out.write_all(bytemuck::cast_slice::<TerrainVertex, u8>(&vertices))?;
    out.write_all(bytemuck::cast_slice::<u32, u8>(&mesh.indices))?;
    Ok(())
}

/// Write `mesh` to a file, creating parent directories as needed.
pub fn save_mesh_dump(path: &Path, mesh: &TerrainMesh) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_mesh_dump(&mut file, mesh)?;
    file.flush()?;
    log::info!("Wrote terrain mesh dump to {}", path.display());
    Ok(())
}

/// Parse a dump from bytes.
pub fn read_mesh_dump(data: &[u8]) -> Result<MeshDump> {
    if data.len() < HEADER_SIZE {
        return Err(TerrainError::invalid("mesh dump shorter than its header"));
    }

    let header: MeshDumpHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);
    if header.magic != MESH_DUMP_MAGIC {
        return Err(TerrainError::invalid("invalid mesh dump magic (expected OTMS)"));
    }
    if header.version != MESH_DUMP_VERSION {
        return Err(TerrainError::invalid(format!(
            "unsupported mesh dump version: {}",
            header.version
        )));
    }

    check_counts(&header)?;

    let vertex_end = HEADER_SIZE + header.vertex_count as usize * std::mem::size_of::<TerrainVertex>();
    let index_end = vertex_end + header.index_count as usize * std::mem::size_of::<u32>();
    if data.len() < index_end {
        return Err(TerrainError::invalid("mesh dump truncated"));
    }
    if data.len() > index_end {
        return Err(TerrainError::invalid(format!(
            "mesh dump has {} trailing bytes",
            data.len() - index_end
        )));
    }

    // Slices of a byte buffer need not be aligned for the target types.
    let vertices: Vec<TerrainVertex> = bytemuck::pod_collect_to_vec(&data[HEADER_SIZE..vertex_end]);
    let indices: Vec<u32> = bytemuck::pod_collect_to_vec(&data[vertex_end..index_end]);
    if let Some(&index) = indices.iter().find(|&&i| i >= header.vertex_count) {
        return Err(TerrainError::invalid(format!(
            "mesh dump index {index} out of range for {} vertices",
            header.vertex_count
        )));
    }

    Ok(MeshDump {
        header,
        vertices,
        indices,
    })
}

/// The header counts must describe a full `width x width` grid mesh.
fn check_counts(header: &MeshDumpHeader) -> Result<()> {
    let width = header.width as usize;
    validate_width(width)?;
    let vertex_count = cell_count(width)?;
    let index_count = cell_count(width - 1)?
        .checked_mul(6)
        .ok_or_else(|| TerrainError::invalid(format!("mesh dump width {width} is too large")))?;

    if header.vertex_count as usize != vertex_count {
        return Err(TerrainError::invalid(format!(
            "mesh dump of width {width} needs {vertex_count} vertices, header says {}",
            header.vertex_count
        )));
    }
    if header.index_count as usize != index_count {
        return Err(TerrainError::invalid(format!(
            "mesh dump of width {width} needs {index_count} indices, header says {}",
            header.index_count
        )));
    }
    Ok(())
}

/// Read a dump from a file.
pub fn load_mesh_dump(path: &Path) -> Result<MeshDump> {
    let data = std::fs::read(path)?;
    read_mesh_dump(&data)
}
