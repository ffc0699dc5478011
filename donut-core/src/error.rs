/// Error types for the wireframe editor core
use thiserror::Error;

/// Errors raised while building or editing a wireframe.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("edge {edge} references vertex {vertex}, but the mesh has {count} vertices")]
    DanglingEdge {
        edge: usize,
        vertex: usize,
        count: usize,
    },

    #[error("unknown vertex id {0}")]
    UnknownVertex(usize),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
