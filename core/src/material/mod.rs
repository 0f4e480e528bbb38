//! CPU-side material types.
//!
//! Provides [`Material`] for PBR metallic-roughness parameters, the
//! [`TextureSlot`] enum naming its texture bindings, and [`AlphaMode`].

mod types;

pub use types::{AlphaMode, Material, TextureSlot};
