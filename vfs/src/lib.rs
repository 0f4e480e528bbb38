//! Read-only asset access for the RedLilium model loader.
//!
//! Provides a blocking read capability through the [`VfsProvider`] trait. The
//! loader resolves the source document, external buffers and file-referenced
//! textures through a provider, so tests can swap the disk for memory.
//!
//! # Providers
//!
//! - [`MemoryProvider`] - In-memory storage for tests and embedded assets
//! - [`FileSystemProvider`] - Native filesystem access (native only)
//!
//! Custom providers can implement [`VfsProvider`] for packed archives or other
//! storage backends.

mod error;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod filesystem;
mod memory;
pub mod path;
mod provider;

pub use error::VfsError;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::VfsProvider;
