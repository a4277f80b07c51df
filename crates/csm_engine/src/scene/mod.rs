//! Scene management
//!
//! A flat, id-ordered set of mesh instances plus the aggregate bounding
//! sphere the shadow and clip fitting work from. Mesh data lives in an
//! application-owned [`MeshPool`]; objects refer to it by handle.

pub mod mesh;
pub mod scene_object;
pub mod container;
pub mod primitives;

pub use mesh::{MeshData, MeshHandle, MeshPool, VertexAttribute, VertexLayout};
pub use scene_object::SceneObject;
pub use container::{ObjectId, Scene};

/// Scene-related errors
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// An object with this id is already in the scene
    #[error("Object {0} already exists in the scene")]
    DuplicateObject(ObjectId),

    /// No object with this id is in the scene
    #[error("Object {0} not found in the scene")]
    ObjectNotFound(ObjectId),

    /// The mesh handle does not resolve in the pool
    #[error("Mesh handle does not resolve in the mesh pool")]
    MeshNotFound,

    /// Vertex layout does not describe the data
    #[error("Invalid vertex layout: {0}")]
    InvalidLayout(String),
}
