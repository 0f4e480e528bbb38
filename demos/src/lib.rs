//! # RedLilium Engine Demos
//!
//! Command line demos built on the RedLilium model loader.
//!
//! ## Available Demos
//!
//! - `gltf_inspect` - Load a `.gltf`/`.glb` file and print what it contains

use std::fmt::Write as _;

use redlilium_core::gltf::Model;
use redlilium_core::material::TextureSlot;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Human-readable summary of a loaded model.
///
/// With `detailed`, every primitive and material is listed.
pub fn describe(model: &Model, detailed: bool) -> String {
    let mut out = String::new();
    let vertices: usize = model.primitives().iter().map(|p| p.vertex_count()).sum();
    let indices: usize = model.primitives().iter().map(|p| p.index_count()).sum();

    let _ = writeln!(out, "model '{}' ({})", model.name(), display_dir(model.directory()));
    let _ = writeln!(
        out,
        "  {} meshes, {} vertices, {} indices",
        model.mesh_count(),
        vertices,
        indices
    );
    let _ = writeln!(
        out,
        "  {} materials, {} textures, {} warnings",
        model.materials().len(),
        model.textures().len(),
        model.warnings().len()
    );

    if detailed {
        for (i, prim) in model.primitives().iter().enumerate() {
            let _ = writeln!(
                out,
                "  mesh {i} '{}': {:?}, {} vertices, {} indices, material {}",
                prim.label().unwrap_or("<unnamed>"),
                prim.topology(),
                prim.vertex_count(),
                prim.index_count(),
                prim.material_index()
            );
        }
        for (i, mat) in model.materials().iter().enumerate() {
            let slots: Vec<String> = TextureSlot::ALL
                .iter()
                .filter_map(|&slot| {
                    mat.texture(slot)
                        .map(|tex| format!("{slot} {}x{}", tex.width, tex.height))
                })
                .collect();
            let _ = writeln!(
                out,
                "  material {i} '{}': base {:?}, metallic {}, roughness {}, textures [{}]",
                mat.name,
                mat.base_color_factor,
                mat.metallic_factor,
                mat.roughness_factor,
                slots.join(", ")
            );
        }
    }

    for warning in model.warnings() {
        let _ = writeln!(out, "  warning: {warning}");
    }
    out
}

fn display_dir(directory: &str) -> &str {
    if directory.is_empty() {
        "."
    } else {
        directory
    }
}
