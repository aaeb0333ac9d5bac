//! Terrain Errors
//!
//! Single error type shared by generation, filtering, meshing, settings
//! loading and mesh dumping.

/// Errors that can occur while building terrain.
#[derive(Debug)]
pub enum TerrainError {
    /// A precondition on the inputs was violated (bad width, size mismatch, ...).
    InvalidArgument(String),
    /// A buffer of `elements` items could not be allocated.
    Allocation { elements: usize },
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
}

impl TerrainError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TerrainError::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            TerrainError::Allocation { elements } => {
                write!(f, "failed to allocate buffer of {elements} elements")
            }
            TerrainError::Io(e) => write!(f, "IO error: {e}"),
            TerrainError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            TerrainError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Json(e)
    }
}

/// Result alias used throughout the terrain module.
pub type Result<T> = std::result::Result<T, TerrainError>;

/// Allocate a vector of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| TerrainError::Allocation { elements: len })?;
    v.resize(len, value);
    Ok(v)
}

/// Allocate an empty vector with room for exactly `len` items.
pub(crate) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| TerrainError::Allocation { elements: len })?;
    Ok(v)
}
