//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`Vertex`] - Interleaved vertex record, ready for direct upload
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`Primitive`] - One drawable unit: vertices, indices and material index

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Vertices form a connected strip of lines.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Vertices form a connected strip of triangles.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Get the number of vertices per primitive (for non-strip topologies).
    pub fn vertices_per_primitive(&self) -> Option<u32> {
        match self {
            Self::PointList => Some(1),
            Self::LineList => Some(2),
            Self::TriangleList => Some(3),
            Self::LineStrip | Self::TriangleStrip => None, // Variable
        }
    }
}

/// A single vertex: position, normal, texture coordinate and color.
///
/// The layout is `#[repr(C)]` and tightly packed (48 bytes), so a slice of
/// vertices can be handed to a GPU upload as-is via [`bytemuck`]. The
/// position is stored as three floats; its homogeneous `w` is implicitly 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position `[x, y, z]`.
    pub position: [f32; 3],
    /// Unit normal `[x, y, z]`.
    pub normal: [f32; 3],
    /// Texture coordinate `[u, v]`.
    pub tex_coord: [f32; 2],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Normal used when the source has no NORMAL stream (the up vector).
    pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];
    /// Texture coordinate used when the source has no TEXCOORD_0 stream.
    pub const DEFAULT_TEX_COORD: [f32; 2] = [0.0, 0.0];
    /// Color used when the source has no usable COLOR_0 stream (opaque white).
    pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Create a vertex at `position` with every other attribute defaulted.
    pub const fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: Self::DEFAULT_NORMAL,
            tex_coord: Self::DEFAULT_TEX_COORD,
            color: Self::DEFAULT_COLOR,
        }
    }

    /// Position as a homogeneous `[x, y, z, 1]` point.
    pub fn position_h(&self) -> [f32; 4] {
        let [x, y, z] = self.position;
        [x, y, z, 1.0]
    }
}

/// One drawable geometry unit of a loaded model.
///
/// Holds its own vertex and index arrays plus the index of its material in
/// the owning model's material list. An empty index list means the primitive
/// is drawn non-indexed (vertices consumed in order).
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub(crate) label: Option<String>,
    pub(crate) mesh: usize,
    pub(crate) topology: PrimitiveTopology,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<u32>,
    pub(crate) material: usize,
}

impl Primitive {
    /// Debug label derived from the source mesh name.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Index of the source mesh this primitive came from.
    pub fn mesh_index(&self) -> usize {
        self.mesh
    }

    /// Primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Vertices in source order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Indices into [`vertices`](Self::vertices); empty for non-indexed draws.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index into the owning model's material list.
    pub fn material_index(&self) -> usize {
        self.material
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices (0 for non-indexed).
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether the primitive is drawn with an index buffer.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Vertex data as raw bytes for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw `u32` bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
