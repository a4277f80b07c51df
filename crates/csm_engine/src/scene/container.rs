//! Id-ordered scene container
//!
//! Objects are keyed by a caller-chosen [`ObjectId`] and always visited in
//! ascending id order, independent of insertion order. Each object can opt
//! out of the aggregate bounds (the ground plane does, so it does not blow
//! up the shadow volume).
//!
//! Bounding spheres cannot shrink incrementally, so removing any object,
//! excluded ones too, rebuilds the aggregate from the remaining included
//! objects in id order.

use std::collections::BTreeMap;

use crate::bounds::BoundingSphere;
use crate::render::backend::{DrawBackend, RenderError};
use super::{SceneError, SceneObject};

/// Identifier of an object within a [`Scene`]
pub type ObjectId = u32;

#[derive(Debug, Clone)]
struct SceneEntry {
    object: SceneObject,
    include_in_bounds: bool,
}

/// Set of scene objects with an aggregate bounding sphere
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneEntry>,
    bounds: BoundingSphere,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under `id`
    ///
    /// Ids are never overwritten. When `include_in_bounds` is set the
    /// object's sphere is folded into the aggregate.
    pub fn add(&mut self, id: ObjectId, object: SceneObject, include_in_bounds: bool) -> Result<(), SceneError> {
        if self.objects.contains_key(&id) {
            return Err(SceneError::DuplicateObject(id));
        }

        if include_in_bounds {
            self.bounds.add_sphere(object.bounding_sphere());
        }
        log::debug!("Added object {} to scene (in bounds: {})", id, include_in_bounds);
        self.objects.insert(id, SceneEntry { object, include_in_bounds });
        Ok(())
    }

    /// Remove and return the object under `id`, if any
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let entry = self.objects.remove(&id)?;
        self.rebuild_bounds();
        log::debug!("Removed object {} from scene", id);
        Some(entry.object)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(&id)
            .map(|entry| &entry.object)
            .ok_or(SceneError::ObjectNotFound(id))
    }

    /// Whether an object with `id` exists
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Whether `id` contributes to the aggregate bounds
    pub fn is_included_in_bounds(&self, id: ObjectId) -> Result<bool, SceneError> {
        self.objects
            .get(&id)
            .map(|entry| entry.include_in_bounds)
            .ok_or(SceneError::ObjectNotFound(id))
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Aggregate bounds of the included objects
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounds
    }

    /// Bounds of every object, excluded ones too
    ///
    /// Starts from the aggregate and folds in the excluded objects in id
    /// order. Used for camera clip fitting, where the ground must not be
    /// clipped away.
    pub fn full_bounding_sphere(&self) -> BoundingSphere {
        let mut bounds = self.bounds;
        for entry in self.objects.values().filter(|entry| !entry.include_in_bounds) {
            bounds.add_sphere(entry.object.bounding_sphere());
        }
        bounds
    }

    /// Visit every object in ascending id order
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(ObjectId, &SceneObject),
    {
        for (&id, entry) in &self.objects {
            visitor(id, &entry.object);
        }
    }

    /// Draw every object in ascending id order
    ///
    /// `visitor` runs before each draw so it can set per-object state such
    /// as the model matrix. The first backend error aborts the pass.
    pub fn render<B, F>(&self, backend: &mut B, mut visitor: F) -> Result<(), RenderError>
    where
        B: DrawBackend + ?Sized,
        F: FnMut(ObjectId, &SceneObject, &mut B),
    {
        for (&id, entry) in &self.objects {
            visitor(id, &entry.object, backend);
            backend.draw(entry.object.mesh())?;
        }
        Ok(())
    }

    fn rebuild_bounds(&mut self) {
        self.bounds.reset();
        for entry in self.objects.values().filter(|entry| entry.include_in_bounds) {
            self.bounds.add_sphere(entry.object.bounding_sphere());
        }
    }
}
