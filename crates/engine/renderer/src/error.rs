//! Error types for the renderer crate

use std::path::PathBuf;

/// Errors that can occur while preparing render geometry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Shadow volume needs more vertices than its buffer holds
    #[error("shadow geometry exceeded capacity: {required} vertices needed, {capacity} available")]
    CapacityExceeded { required: usize, capacity: usize },

    /// Triangle list refers to a vertex that does not exist
    #[error("mesh index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Index list length is not a multiple of three
    #[error("mesh index count {0} is not a whole number of triangles")]
    PartialTriangle(usize),

    /// OBJ file could not be parsed
    #[error("failed to load mesh {path}: {source}")]
    MeshLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// OBJ file contained no triangles
    #[error("mesh {0} contains no triangles")]
    EmptyMesh(PathBuf),
}

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;
