//! glTF 2.0 model loader.
//!
//! Loads `.gltf`/`.glb` documents into CPU-side [`Primitive`]s and
//! [`Material`]s, collected in an immutable [`Model`].
//!
//! # Pipeline
//!
//! 1. The container flavor is detected (magic bytes, then extension) and the
//!    whole document is parsed and validated.
//! 2. Buffers are resolved: GLB binary chunk, base64 data URIs, or external
//!    files read through a [`VfsProvider`].
//! 3. Materials are extracted and their textures resolved. File-referenced
//!    images go through a [`TextureCache`], so the same path always yields the
//!    same `Arc<Texture>`.
//! 4. Every mesh primitive is decoded into interleaved [`Vertex`] records and
//!    `u32` indices.
//!
//! Structural problems abort the load with a [`LoadError`]. Texture problems
//! never do: the slot is left empty and a [`LoadWarning`] is recorded on the
//! model.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use redlilium_core::gltf::{LoadOptions, ModelLoader};
//! use redlilium_core::texture::TextureCache;
//! use redlilium_vfs::FileSystemProvider;
//!
//! let cache = Arc::new(TextureCache::new());
//! let loader = ModelLoader::new(FileSystemProvider::new("assets"))
//!     .with_cache(Arc::clone(&cache))
//!     .with_options(LoadOptions::default().with_index_validation(false));
//!
//! let model = loader.load("models/helmet.gltf")?;
//! println!("{}: {} meshes", model.name(), model.mesh_count());
//! ```
//!
//! [`Primitive`]: crate::mesh::Primitive
//! [`Material`]: crate::material::Material
//! [`Vertex`]: crate::mesh::Vertex

mod accessor;
mod buffer;
mod error;
mod geometry;
mod loader;
mod material;
#[cfg(test)]
mod tests;
mod texture;
pub mod types;

pub use accessor::{ComponentType, Shape};
pub use error::{AccessorError, ErrorKind, LoadError, LoadWarning, TextureError};
pub use types::*;

use std::sync::Arc;

use redlilium_vfs::{path, MemoryProvider, VfsProvider};

use crate::texture::TextureCache;

/// Loads models through a [`VfsProvider`].
///
/// Each load uses its own texture cache unless one is shared with
/// [`with_cache`](Self::with_cache); a shared cache makes the same image path
/// resolve to the same `Arc<Texture>` across loads.
pub struct ModelLoader<P: VfsProvider> {
    provider: P,
    cache: Option<Arc<TextureCache>>,
    options: LoadOptions,
}

impl<P: VfsProvider> ModelLoader<P> {
    /// Create a loader reading through `provider` with default options.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: None,
            options: LoadOptions::default(),
        }
    }

    /// Share `cache` between every load made by this loader.
    pub fn with_cache(mut self, cache: Arc<TextureCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the load options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// The provider this loader reads through.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the document at `path` (relative to the provider root).
    ///
    /// The model is named after the file name; its directory is the parent
    /// of `path`, and relative buffer and image URIs resolve against it.
    pub fn load(&self, path: &str) -> Result<Model, LoadError> {
        let normalized = path::normalize(path).map_err(|source| LoadError::Read {
            path: path.to_owned(),
            source,
        })?;
        let data = self
            .provider
            .read(&normalized)
            .map_err(|source| LoadError::Read {
                path: normalized.clone(),
                source,
            })?;

        self.assemble(
            &data,
            path::file_name(&normalized),
            path::parent(&normalized),
        )
    }

    /// Load a document from memory.
    ///
    /// Relative URIs resolve against the provider root.
    pub fn load_slice(&self, data: &[u8], name: &str) -> Result<Model, LoadError> {
        self.assemble(data, name, "")
    }

    fn assemble(&self, data: &[u8], name: &str, directory: &str) -> Result<Model, LoadError> {
        let parsed = loader::parse(data, name)?;

        let local_cache;
        let cache = match &self.cache {
            Some(shared) => shared.as_ref(),
            None => {
                local_cache = TextureCache::new();
                &local_cache
            }
        };

        let mut ctx =
            loader::LoadContext::new(parsed, &self.provider, directory, cache, &self.options)?;
        let materials = ctx.load_materials();
        let primitives = ctx.load_primitives()?;
        let warnings = ctx.into_warnings();

        log::info!(
            "Loaded model '{name}': {} meshes, {} materials, {} texture warnings",
            primitives.len(),
            materials.len(),
            warnings.len()
        );

        Ok(Model {
            name: name.to_owned(),
            directory: directory.to_owned(),
            primitives,
            materials,
            warnings,
        })
    }
}

/// Load a model from a file on disk.
///
/// Buffers and textures are resolved relative to the file's directory, and
/// no texture cache outlives the call.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_model(path: impl AsRef<std::path::Path>) -> Result<Model, LoadError> {
    load_model_with(path, LoadOptions::default())
}

/// [`load_model`] with explicit [`LoadOptions`].
///
/// The file is read through a provider rooted at the filesystem root, so
/// relative URIs may climb out of the model's directory (`../buffers/a.bin`).
#[cfg(not(target_arch = "wasm32"))]
pub fn load_model_with(
    path: impl AsRef<std::path::Path>,
    options: LoadOptions,
) -> Result<Model, LoadError> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|err| LoadError::Read {
        path: path.display().to_string(),
        source: redlilium_vfs::VfsError::Io(err),
    })?;
    let root = absolute.ancestors().last().unwrap_or(absolute.as_path());
    let relative = absolute
        .strip_prefix(root)
        .unwrap_or(absolute.as_path())
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let model = ModelLoader::new(redlilium_vfs::FileSystemProvider::new(root))
        .with_options(options)
        .load(&relative)?;
    let directory = absolute.parent().unwrap_or(root);
    Ok(model.with_directory(directory.display().to_string()))
}

/// Load a self-contained model (GLB or embedded data URIs) from memory.
///
/// External references fail: buffers with a fatal error, textures with a
/// warning.
pub fn load_model_from_slice(data: &[u8], name: &str) -> Result<Model, LoadError> {
    ModelLoader::new(MemoryProvider::new()).load_slice(data, name)
}
