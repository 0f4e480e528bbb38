//! Data types for glTF loading results and options.

use std::sync::Arc;

use crate::material::{Material, TextureSlot};
use crate::mesh::Primitive;
use crate::texture::Texture;

use super::error::LoadWarning;

/// Options controlling a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Decode referenced textures. When disabled every texture slot is left
    /// empty and no image is read.
    pub load_textures: bool,
    /// Reject index values that reach past the primitive's vertex count.
    pub validate_indices: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            load_textures: true,
            validate_indices: true,
        }
    }
}

impl LoadOptions {
    /// Enable or disable texture decoding.
    pub fn with_textures(mut self, enabled: bool) -> Self {
        self.load_textures = enabled;
        self
    }

    /// Enable or disable index range validation.
    pub fn with_index_validation(mut self, enabled: bool) -> Self {
        self.validate_indices = enabled;
        self
    }
}

/// A loaded model: drawable primitives plus the materials they reference.
///
/// Models are immutable and only produced by the loader. Every primitive's
/// material index is valid for [`materials`](Self::materials), which is never
/// empty.
#[derive(Debug)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) directory: String,
    pub(crate) primitives: Vec<Primitive>,
    pub(crate) materials: Vec<Material>,
    pub(crate) warnings: Vec<LoadWarning>,
}

impl Model {
    /// Source identifier (file name, or the name given to a slice load).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory relative texture paths were resolved against.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Number of drawable meshes (one per source primitive).
    pub fn mesh_count(&self) -> usize {
        self.primitives.len()
    }

    /// All primitives, in document order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Primitive `index`, if in range.
    pub fn primitive(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    /// All materials, in document order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material `index`, if in range.
    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Material used by primitive `index`.
    pub fn material_for(&self, index: usize) -> Option<&Material> {
        self.primitive(index)
            .and_then(|primitive| self.material(primitive.material_index()))
    }

    /// Textures that failed to resolve during the load.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Distinct textures referenced by the materials, in first-use order.
    pub fn textures(&self) -> Vec<Arc<Texture>> {
        let mut unique: Vec<Arc<Texture>> = Vec::new();
        for material in &self.materials {
            for slot in TextureSlot::ALL {
                if let Some(texture) = material.texture(slot) {
                    if !unique.iter().any(|seen| Arc::ptr_eq(seen, texture)) {
                        unique.push(Arc::clone(texture));
                    }
                }
            }
        }
        unique
    }

    pub(crate) fn with_directory(mut self, directory: String) -> Self {
        self.directory = directory;
        self
    }
}
