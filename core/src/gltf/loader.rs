//! Internal glTF loading logic.
//!
//! [`parse`] turns container bytes into a validated document. The
//! [`LoadContext`] then holds everything needed during extraction: the parsed
//! document, resolved buffer data, the read capability and the texture cache.

use gltf_dep::json::mesh::Semantic;
use gltf_dep::json::validation::Checked;
use redlilium_vfs::VfsProvider;
use serde_json::Value;

use crate::material::Material;
use crate::mesh::Primitive;
use crate::texture::TextureCache;

use super::error::{LoadError, LoadWarning};
use super::texture::TextureResolver;
use super::types::LoadOptions;
use super::{buffer, geometry, material};

/// Magic bytes at the start of every binary glTF container.
const GLB_MAGIC: &[u8; 4] = b"glTF";

/// The two glTF container flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerFlavor {
    /// `.gltf`: a JSON document.
    Json,
    /// `.glb`: a binary container with a JSON chunk and an optional binary chunk.
    Binary,
}

/// Pick the container flavor. Magic bytes win over the file extension.
pub(crate) fn detect_flavor(data: &[u8], name: &str) -> ContainerFlavor {
    if data.starts_with(GLB_MAGIC) {
        return ContainerFlavor::Binary;
    }
    let is_glb = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("glb"));
    if is_glb {
        ContainerFlavor::Binary
    } else {
        ContainerFlavor::Json
    }
}

/// A validated document plus the GLB binary chunk, if any.
pub(crate) struct Parsed {
    pub document: gltf_dep::Document,
    pub blob: Option<Vec<u8>>,
}

/// Parse and validate a whole document before anything is extracted.
pub(crate) fn parse(data: &[u8], name: &str) -> Result<Parsed, LoadError> {
    let (mut value, blob): (Value, _) = match detect_flavor(data, name) {
        ContainerFlavor::Binary => {
            let glb = gltf_dep::binary::Glb::from_slice(data)?;
            let value = serde_json::from_slice(&glb.json)?;
            (value, glb.bin.map(|bin| bin.into_owned()))
        }
        ContainerFlavor::Json => (serde_json::from_slice(data)?, None),
    };
    relax_defaults(&mut value);
    let root: gltf_dep::json::Root = serde_json::from_value(value)?;

    check_version(&root.asset)?;
    check_positions(&root)?;

    let document = gltf_dep::Document::from_json(root)?;
    Ok(Parsed { document, blob })
}

/// Rewrite values that mean "use the default" into absent fields, so document
/// validation accepts them: `byteStride: 0` (tightly packed) and a negative
/// primitive `material` (material 0).
fn relax_defaults(root: &mut Value) {
    if let Some(views) = root.get_mut("bufferViews").and_then(Value::as_array_mut) {
        for view in views.iter_mut().filter_map(Value::as_object_mut) {
            if view.get("byteStride").and_then(Value::as_u64) == Some(0) {
                view.remove("byteStride");
            }
        }
    }

    let primitives = root
        .get_mut("meshes")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(|mesh| mesh.get_mut("primitives").and_then(Value::as_array_mut))
        .flatten()
        .filter_map(Value::as_object_mut);
    for primitive in primitives {
        if primitive
            .get("material")
            .and_then(Value::as_i64)
            .is_some_and(|index| index < 0)
        {
            primitive.remove("material");
        }
    }
}

/// Parse `major.minor` from a glTF version string.
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let (major, minor) = version.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Accept any 2.x document whose `minVersion` (if present) is at most 2.0.
fn check_version(asset: &gltf_dep::json::Asset) -> Result<(), LoadError> {
    let unsupported = |version: &str| LoadError::UnsupportedVersion {
        version: version.to_owned(),
    };

    match parse_version(&asset.version) {
        Some((2, _)) => {}
        _ => return Err(unsupported(&asset.version)),
    }
    if let Some(min_version) = asset.min_version.as_deref() {
        match parse_version(min_version) {
            Some(min) if min <= (2, 0) => {}
            _ => return Err(unsupported(min_version)),
        }
    }
    Ok(())
}

/// Every primitive must carry POSITION. Checked ahead of document validation
/// so the failure is reported as a missing attribute rather than a parse error.
fn check_positions(root: &gltf_dep::json::Root) -> Result<(), LoadError> {
    for (mesh_idx, mesh) in root.meshes.iter().enumerate() {
        for (prim_idx, primitive) in mesh.primitives.iter().enumerate() {
            let has_position = primitive
                .attributes
                .keys()
                .any(|semantic| matches!(semantic, Checked::Valid(Semantic::Positions)));
            if !has_position {
                return Err(LoadError::MissingRequiredAttribute {
                    mesh: mesh_idx,
                    primitive: prim_idx,
                    attribute: "POSITION",
                });
            }
        }
    }
    Ok(())
}

/// Loading context that holds resolved data during one load.
pub(crate) struct LoadContext<'a> {
    document: gltf_dep::Document,
    /// Resolved buffer data (one `Vec<u8>` per glTF buffer).
    buffers: Vec<Vec<u8>>,
    provider: &'a dyn VfsProvider,
    /// Directory, relative to the provider root, that URIs resolve against.
    directory: &'a str,
    cache: &'a TextureCache,
    options: &'a LoadOptions,
    warnings: Vec<LoadWarning>,
}

impl<'a> LoadContext<'a> {
    /// Resolve every buffer of `parsed` and build the context.
    pub fn new(
        parsed: Parsed,
        provider: &'a dyn VfsProvider,
        directory: &'a str,
        cache: &'a TextureCache,
        options: &'a LoadOptions,
    ) -> Result<Self, LoadError> {
        let buffers = buffer::resolve_buffers(&parsed.document, parsed.blob, provider, directory)?;
        Ok(Self {
            document: parsed.document,
            buffers,
            provider,
            directory,
            cache,
            options,
            warnings: Vec::new(),
        })
    }

    /// Load all materials, resolving textures unless disabled.
    pub fn load_materials(&mut self) -> Vec<Material> {
        let resolver = TextureResolver {
            buffers: &self.buffers,
            provider: self.provider,
            directory: self.directory,
            cache: self.cache,
        };
        let resolver = self.options.load_textures.then_some(&resolver);
        material::extract_materials(&self.document, resolver, &mut self.warnings)
    }

    /// Load every mesh primitive in document order.
    pub fn load_primitives(&self) -> Result<Vec<Primitive>, LoadError> {
        geometry::extract_primitives(&self.document, &self.buffers, self.options.validate_indices)
    }

    /// Consume the context and return the texture warnings it collected.
    pub fn into_warnings(self) -> Vec<LoadWarning> {
        self.warnings
    }
}
