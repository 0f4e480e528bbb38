//! Material data types for CPU-side PBR metallic-roughness materials.

use std::fmt;
use std::sync::Arc;

use crate::texture::Texture;

/// Alpha rendering mode.
///
/// Affects pipeline state (blend configuration), not shader bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Fully opaque (alpha ignored).
    #[default]
    Opaque,
    /// Alpha masking with cutoff threshold.
    Mask,
    /// Full alpha blending.
    Blend,
}

/// The texture slots a [`Material`] can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color (albedo) texture.
    BaseColor,
    /// Metallic-roughness texture (B=metallic, G=roughness).
    MetallicRoughness,
    /// Tangent-space normal map.
    Normal,
}

impl TextureSlot {
    /// All slots, in the order the loader resolves them.
    pub const ALL: [TextureSlot; 3] = [Self::BaseColor, Self::MetallicRoughness, Self::Normal];
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BaseColor => "base color",
            Self::MetallicRoughness => "metallic-roughness",
            Self::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// CPU-side PBR metallic-roughness material.
///
/// Factors are copied verbatim from the source document. Texture slots hold
/// shared [`Texture`] handles; `None` means the material has no texture in
/// that slot (there is no placeholder texture).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name (empty when the source material is unnamed).
    pub name: String,
    /// Base color factor `[r, g, b, a]`, linear.
    pub base_color_factor: [f32; 4],
    /// Metallic factor (0.0–1.0).
    pub metallic_factor: f32,
    /// Roughness factor (0.0–1.0).
    pub roughness_factor: f32,
    /// Emissive factor `[r, g, b]`, linear.
    pub emissive_factor: [f32; 3],
    /// Alpha rendering mode.
    pub alpha_mode: AlphaMode,
    /// Alpha cutoff threshold (for [`AlphaMode::Mask`]).
    pub alpha_cutoff: f32,
    /// Whether back faces are rendered.
    pub double_sided: bool,
    /// Base color texture.
    pub base_color_texture: Option<Arc<Texture>>,
    /// Metallic-roughness texture.
    pub metallic_roughness_texture: Option<Arc<Texture>>,
    /// Normal map texture.
    pub normal_texture: Option<Arc<Texture>>,
}

impl Material {
    /// Name given to the material synthesized for documents without any.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Texture currently bound to `slot`.
    pub fn texture(&self, slot: TextureSlot) -> Option<&Arc<Texture>> {
        match slot {
            TextureSlot::BaseColor => self.base_color_texture.as_ref(),
            TextureSlot::MetallicRoughness => self.metallic_roughness_texture.as_ref(),
            TextureSlot::Normal => self.normal_texture.as_ref(),
        }
    }

    pub(crate) fn set_texture(&mut self, slot: TextureSlot, texture: Option<Arc<Texture>>) {
        match slot {
            TextureSlot::BaseColor => self.base_color_texture = texture,
            TextureSlot::MetallicRoughness => self.metallic_roughness_texture = texture,
            TextureSlot::Normal => self.normal_texture = texture,
        }
    }

    /// Whether any texture slot is populated.
    pub fn has_textures(&self) -> bool {
        TextureSlot::ALL.iter().any(|&slot| self.texture(slot).is_some())
    }
}

impl Default for Material {
    /// Opaque white, non-metallic, roughness 0.5, no textures.
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            metallic_factor: 0.0,
            roughness_factor: 0.5,
            emissive_factor: [0.0, 0.0, 0.0],
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            base_color_texture: None,
            metallic_roughness_texture: None,
            normal_texture: None,
        }
    }
}
