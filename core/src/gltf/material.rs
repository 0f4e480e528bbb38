//! Material extraction: glTF materials → [`Material`] records.

use crate::material::{AlphaMode, Material, TextureSlot};

use super::error::LoadWarning;
use super::texture::TextureResolver;

/// Extract every material in document order.
///
/// Textures are resolved through `resolver` when one is given; each failure
/// leaves its slot empty and is recorded in `warnings`. A document without
/// materials yields a single [`Material::default`].
pub(crate) fn extract_materials(
    document: &gltf_dep::Document,
    resolver: Option<&TextureResolver<'_>>,
    warnings: &mut Vec<LoadWarning>,
) -> Vec<Material> {
    let mut materials: Vec<Material> = document
        .materials()
        .enumerate()
        .map(|(idx, mat)| {
            let mut material = convert(&mat);
            if let Some(resolver) = resolver {
                resolve_textures(idx, &mat, &mut material, resolver, warnings);
            }
            material
        })
        .collect();

    if materials.is_empty() {
        materials.push(Material::default());
    }
    materials
}

fn convert(mat: &gltf_dep::Material<'_>) -> Material {
    let pbr = mat.pbr_metallic_roughness();
    Material {
        name: mat.name().unwrap_or_default().to_owned(),
        base_color_factor: pbr.base_color_factor(),
        metallic_factor: pbr.metallic_factor(),
        roughness_factor: pbr.roughness_factor(),
        emissive_factor: mat.emissive_factor(),
        alpha_mode: match mat.alpha_mode() {
            gltf_dep::material::AlphaMode::Opaque => AlphaMode::Opaque,
            gltf_dep::material::AlphaMode::Mask => AlphaMode::Mask,
            gltf_dep::material::AlphaMode::Blend => AlphaMode::Blend,
        },
        alpha_cutoff: mat.alpha_cutoff().unwrap_or(0.5),
        double_sided: mat.double_sided(),
        base_color_texture: None,
        metallic_roughness_texture: None,
        normal_texture: None,
    }
}

/// Source texture referenced by `slot`, if any.
fn slot_texture<'a>(
    mat: &gltf_dep::Material<'a>,
    slot: TextureSlot,
) -> Option<gltf_dep::Texture<'a>> {
    let pbr = mat.pbr_metallic_roughness();
    match slot {
        TextureSlot::BaseColor => pbr.base_color_texture().map(|info| info.texture()),
        TextureSlot::MetallicRoughness => {
            pbr.metallic_roughness_texture().map(|info| info.texture())
        }
        TextureSlot::Normal => mat.normal_texture().map(|normal| normal.texture()),
    }
}

fn resolve_textures(
    idx: usize,
    mat: &gltf_dep::Material<'_>,
    material: &mut Material,
    resolver: &TextureResolver<'_>,
    warnings: &mut Vec<LoadWarning>,
) {
    for slot in TextureSlot::ALL {
        let Some(texture) = slot_texture(mat, slot) else {
            continue;
        };
        match resolver.resolve(&texture) {
            Ok(resolved) => material.set_texture(slot, Some(resolved)),
            Err(error) => {
                log::warn!(
                    "material {idx} ('{}'): {slot} texture {} left empty: {error}",
                    material.name,
                    texture.index()
                );
                warnings.push(LoadWarning {
                    material: idx,
                    slot,
                    texture: texture.index(),
                    error,
                });
            }
        }
    }
}
