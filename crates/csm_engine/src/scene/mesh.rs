//! Mesh data and the pool that owns it
//!
//! Meshes are interleaved float arrays described by a [`VertexLayout`].
//! They live in a [`MeshPool`] owned by the application; scene objects only
//! hold [`MeshHandle`]s into it, so the pool can grow without invalidating
//! anything the scene refers to.

use slotmap::SlotMap;

use crate::bounds::BoundingSphere;
use crate::foundation::math::{Mat4, Vec3};
use super::SceneError;

slotmap::new_key_type! {
    /// Handle to a mesh stored in a [`MeshPool`]
    pub struct MeshHandle;
}

/// One float attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Number of floats
    pub size: usize,
    /// Offset in floats from the start of the vertex
    pub offset: usize,
    /// Whether the GPU should normalize the values
    pub normalized: bool,
}

impl VertexAttribute {
    /// Create a new attribute description
    pub const fn new(size: usize, offset: usize, normalized: bool) -> Self {
        Self { size, offset, normalized }
    }
}

/// Interleaved vertex layout with a designated position attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    attributes: Vec<VertexAttribute>,
    position: usize,
}

impl VertexLayout {
    /// Create a validated layout
    ///
    /// `stride` is in floats and `position` indexes into `attributes`. Every
    /// attribute must fit inside the stride and the position attribute must
    /// have at least three components.
    pub fn new(stride: usize, attributes: Vec<VertexAttribute>, position: usize) -> Result<Self, SceneError> {
        if stride == 0 {
            return Err(SceneError::InvalidLayout("stride must be positive".to_string()));
        }
        for (index, attribute) in attributes.iter().enumerate() {
            if attribute.size == 0 || attribute.offset + attribute.size > stride {
                return Err(SceneError::InvalidLayout(format!(
                    "attribute {} ({} floats at {}) does not fit a stride of {}",
                    index, attribute.size, attribute.offset, stride
                )));
            }
        }
        match attributes.get(position) {
            Some(attribute) if attribute.size >= 3 => {}
            Some(_) => {
                return Err(SceneError::InvalidLayout("position attribute needs 3 components".to_string()));
            }
            None => {
                return Err(SceneError::InvalidLayout(format!("no attribute at position index {}", position)));
            }
        }

        Ok(Self { stride, attributes, position })
    }

    /// Position (3), normal (3), texture coordinates (2)
    pub fn position_normal_uv() -> Self {
        Self {
            stride: 8,
            attributes: vec![
                VertexAttribute::new(3, 0, false),
                VertexAttribute::new(3, 3, false),
                VertexAttribute::new(2, 6, false),
            ],
            position: 0,
        }
    }

    /// Vertex size in floats
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All attributes in declaration order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// The attribute holding vertex positions
    pub fn position_attribute(&self) -> VertexAttribute {
        self.attributes[self.position]
    }
}

/// Interleaved vertex data plus its layout
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<f32>,
    layout: VertexLayout,
}

impl MeshData {
    /// Wrap vertex data; trailing floats short of a full vertex are ignored
    pub fn new(vertices: Vec<f32>, layout: VertexLayout) -> Self {
        if vertices.len() % layout.stride() != 0 {
            log::warn!(
                "Mesh has {} trailing floats that do not form a whole vertex",
                vertices.len() % layout.stride()
            );
        }
        Self { vertices, layout }
    }

    /// Raw interleaved floats
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Vertex layout
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of whole vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }

    /// Local-space vertex positions
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + Clone + '_ {
        let offset = self.layout.position_attribute().offset;
        self.vertices
            .chunks_exact(self.layout.stride())
            .map(move |vertex| Vec3::new(vertex[offset], vertex[offset + 1], vertex[offset + 2]))
    }

    /// Bounding sphere of the mesh after applying `transform`
    pub fn bounding_sphere(&self, transform: &Mat4) -> BoundingSphere {
        BoundingSphere::from_strided(
            &self.vertices,
            self.layout.stride(),
            self.layout.position_attribute().offset,
            transform,
        )
    }
}

/// Owner of all mesh data referenced by scenes
#[derive(Debug, Default)]
pub struct MeshPool {
    meshes: SlotMap<MeshHandle, MeshData>,
}

impl MeshPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a mesh and return its handle
    pub fn insert(&mut self, mesh: MeshData) -> MeshHandle {
        log::debug!("Adding mesh with {} vertices to pool", mesh.vertex_count());
        self.meshes.insert(mesh)
    }

    /// Look up a mesh
    pub fn get(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle)
    }

    /// Remove a mesh; handles to it stop resolving
    pub fn remove(&mut self, handle: MeshHandle) -> Option<MeshData> {
        self.meshes.remove(handle)
    }

    /// Number of stored meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
