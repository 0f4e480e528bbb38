//! # RedLilium Engine Core
//!
//! CPU-side asset data for RedLilium Engine: meshes, materials and textures,
//! plus the glTF loader that produces them.

#[cfg(feature = "gltf")]
pub mod gltf;
pub mod material;
pub mod mesh;
pub mod texture;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
