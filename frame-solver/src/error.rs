//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Member {0} not found in model")]
    MemberNotFound(usize),

    #[error("Material {0} not found in model")]
    MaterialNotFound(usize),

    #[error("Section {0} not found in model")]
    SectionNotFound(usize),

    #[error("Load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("There is already a node at ({x}, {y})")]
    DuplicateNode { x: f64, y: f64 },

    #[error("There is already a member between nodes {start} and {end}")]
    DuplicateMember { start: usize, end: usize },

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular stiffness matrix - structure is unstable or insufficiently supported")]
    SingularMatrix,

    #[error("Model not analyzed - run analyze() first")]
    NotAnalyzed,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for frame analysis operations
pub type FrameResult<T> = Result<T, FrameError>;
