//! Geometry extraction: glTF mesh primitives → [`Primitive`] records.

use gltf_dep::Semantic;

use crate::mesh::{Primitive, PrimitiveTopology, Vertex};

use super::accessor::{self, Element};
use super::error::{AccessorError, LoadError};

/// Extract every primitive of every mesh, in document order.
pub(crate) fn extract_primitives(
    document: &gltf_dep::Document,
    buffers: &[Vec<u8>],
    validate_indices: bool,
) -> Result<Vec<Primitive>, LoadError> {
    let mut result = Vec::new();

    for mesh in document.meshes() {
        let primitive_count = mesh.primitives().len();

        for (prim_idx, primitive) in mesh.primitives().enumerate() {
            let label = mesh.name().map(|name| {
                if primitive_count > 1 {
                    format!("{name}_prim{prim_idx}")
                } else {
                    name.to_string()
                }
            });

            let extracted = PrimitiveExtractor {
                mesh: mesh.index(),
                primitive: prim_idx,
                buffers,
            }
            .extract(&primitive, label, validate_indices)?;

            log::debug!(
                "mesh {} primitive {}: {} vertices, {} indices, material {}",
                mesh.index(),
                prim_idx,
                extracted.vertex_count(),
                extracted.index_count(),
                extracted.material_index()
            );
            result.push(extracted);
        }
    }

    Ok(result)
}

/// Map a glTF primitive mode onto an engine topology.
pub(crate) fn map_topology(mode: gltf_dep::mesh::Mode) -> Option<PrimitiveTopology> {
    use gltf_dep::mesh::Mode;

    match mode {
        Mode::Points => Some(PrimitiveTopology::PointList),
        Mode::Lines => Some(PrimitiveTopology::LineList),
        Mode::LineStrip => Some(PrimitiveTopology::LineStrip),
        Mode::Triangles => Some(PrimitiveTopology::TriangleList),
        Mode::TriangleStrip => Some(PrimitiveTopology::TriangleStrip),
        Mode::LineLoop | Mode::TriangleFan => None,
    }
}

/// Location of the primitive being extracted, for error reporting.
struct PrimitiveExtractor<'a> {
    mesh: usize,
    primitive: usize,
    buffers: &'a [Vec<u8>],
}

impl PrimitiveExtractor<'_> {
    fn extract(
        &self,
        primitive: &gltf_dep::Primitive<'_>,
        label: Option<String>,
        validate_indices: bool,
    ) -> Result<Primitive, LoadError> {
        let topology =
            map_topology(primitive.mode()).ok_or_else(|| LoadError::UnsupportedTopology {
                mesh: self.mesh,
                primitive: self.primitive,
                mode: format!("{:?}", primitive.mode()),
            })?;

        let position =
            primitive
                .get(&Semantic::Positions)
                .ok_or(LoadError::MissingRequiredAttribute {
                    mesh: self.mesh,
                    primitive: self.primitive,
                    attribute: "POSITION",
                })?;
        let vertex_count = position.count();

        let mut vertices: Vec<Vertex> = self
            .read::<[f32; 3]>(&position)?
            .map(Vertex::at)
            .collect();

        if let Some(normal) = primitive.get(&Semantic::Normals) {
            self.check_count("NORMAL", &normal, vertex_count)?;
            for (vertex, n) in vertices.iter_mut().zip(self.read::<[f32; 3]>(&normal)?) {
                vertex.normal = n;
            }
        }

        if let Some(tex_coord) = primitive.get(&Semantic::TexCoords(0)) {
            self.check_count("TEXCOORD_0", &tex_coord, vertex_count)?;
            for (vertex, uv) in vertices.iter_mut().zip(self.read::<[f32; 2]>(&tex_coord)?) {
                vertex.tex_coord = uv;
            }
        }

        if let Some(color) = primitive.get(&Semantic::Colors(0)) {
            self.check_count("COLOR_0", &color, vertex_count)?;
            self.fill_colors(&color, &mut vertices)?;
        }

        let indices = match primitive.indices() {
            Some(accessor) => {
                let indices: Vec<u32> = accessor::read_indices(&accessor, self.buffers)
                    .map_err(|e| e.at(self.mesh, self.primitive))?
                    .collect();
                if validate_indices {
                    self.check_indices(accessor.index(), &indices, vertex_count)?;
                }
                indices
            }
            None => Vec::new(),
        };

        Ok(Primitive {
            label,
            mesh: self.mesh,
            topology,
            vertices,
            indices,
            material: primitive.material().index().unwrap_or(0),
        })
    }

    fn read<'b, T: Element>(
        &'b self,
        accessor: &gltf_dep::Accessor<'_>,
    ) -> Result<accessor::Elements<'b, T>, LoadError> {
        accessor::read::<T>(accessor, self.buffers).map_err(|e| e.at(self.mesh, self.primitive))
    }

    fn check_count(
        &self,
        attribute: &'static str,
        accessor: &gltf_dep::Accessor<'_>,
        expected: usize,
    ) -> Result<(), LoadError> {
        if accessor.count() == expected {
            return Ok(());
        }
        Err(LoadError::AttributeCountMismatch {
            mesh: self.mesh,
            primitive: self.primitive,
            attribute,
            accessor: accessor.index(),
            expected,
            found: accessor.count(),
        })
    }

    /// COLOR_0 accepts float vec3 (alpha 1) and vec4. Any other layout keeps
    /// the default white and logs a warning.
    fn fill_colors(
        &self,
        accessor: &gltf_dep::Accessor<'_>,
        vertices: &mut [Vertex],
    ) -> Result<(), LoadError> {
        use gltf_dep::accessor::Dimensions;

        let colors: Result<Vec<[f32; 4]>, AccessorError> = match accessor.dimensions() {
            Dimensions::Vec3 => accessor::read::<[f32; 3]>(accessor, self.buffers)
                .map(|colors| colors.map(|[r, g, b]| [r, g, b, 1.0]).collect()),
            _ => accessor::read::<[f32; 4]>(accessor, self.buffers).map(|colors| colors.collect()),
        };

        match colors {
            Ok(colors) => {
                for (vertex, color) in vertices.iter_mut().zip(colors) {
                    vertex.color = color;
                }
                Ok(())
            }
            Err(AccessorError::Unsupported { accessor, reason }) => {
                log::warn!(
                    "mesh {} primitive {}: skipping COLOR_0 accessor {accessor}: {reason}",
                    self.mesh,
                    self.primitive
                );
                Ok(())
            }
            Err(err) => Err(err.at(self.mesh, self.primitive)),
        }
    }

    fn check_indices(
        &self,
        accessor: usize,
        indices: &[u32],
        vertex_count: usize,
    ) -> Result<(), LoadError> {
        match indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            Some((position, index)) => Err(LoadError::OutOfRange {
                mesh: self.mesh,
                primitive: self.primitive,
                accessor,
                reason: format!(
                    "index {index} at position {position} exceeds vertex count {vertex_count}"
                ),
            }),
            None => Ok(()),
        }
    }
}
