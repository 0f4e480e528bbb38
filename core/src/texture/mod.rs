//! CPU-side texture types.
//!
//! Provides [`Texture`] for holding decoded pixel data and
//! [`TextureCache`] for sharing decoded textures by source path.

mod cache;
mod types;

pub use cache::TextureCache;
pub use types::Texture;
