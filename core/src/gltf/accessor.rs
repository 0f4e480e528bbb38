//! Typed accessor decoding.
//!
//! Decoding is driven by a closed dispatch table: each [`Element`] type lists
//! the (component type, shape) pairs it can be decoded from, and anything
//! outside that table is rejected up front as unsupported. Supported:
//!
//! | Element       | Component      | Shape  |
//! |---------------|----------------|--------|
//! | `u32` (index) | u8, u16, u32   | scalar |
//! | `f32`         | f32            | scalar |
//! | `[f32; 2]`    | f32            | vec2   |
//! | `[f32; 3]`    | f32            | vec3   |
//! | `[f32; 4]`    | f32            | vec4   |
//!
//! Sparse accessors, matrix shapes, signed integers and normalized integers
//! are not supported.

use super::buffer::{self, DataView};
use super::error::AccessorError;

/// Component type of accessor data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// IEEE-754 single precision float.
    F32,
}

impl ComponentType {
    /// Size of one component in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    fn from_gltf(data_type: gltf_dep::accessor::DataType) -> Option<Self> {
        use gltf_dep::accessor::DataType;

        match data_type {
            DataType::U8 => Some(Self::U8),
            DataType::U16 => Some(Self::U16),
            DataType::U32 => Some(Self::U32),
            DataType::F32 => Some(Self::F32),
            DataType::I8 | DataType::I16 => None,
        }
    }
}

/// Number of components per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
}

impl Shape {
    /// Components per element.
    pub fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    fn from_gltf(dimensions: gltf_dep::accessor::Dimensions) -> Option<Self> {
        use gltf_dep::accessor::Dimensions;

        match dimensions {
            Dimensions::Scalar => Some(Self::Scalar),
            Dimensions::Vec2 => Some(Self::Vec2),
            Dimensions::Vec3 => Some(Self::Vec3),
            Dimensions::Vec4 => Some(Self::Vec4),
            Dimensions::Mat2 | Dimensions::Mat3 | Dimensions::Mat4 => None,
        }
    }
}

/// Decoder for one element's raw little-endian bytes.
pub type Decode<T> = fn(&[u8]) -> T;

/// A value type the accessor reader can produce.
pub trait Element: Copy {
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    /// Decoder for elements stored as `component` × `shape`, or `None` if
    /// that layout cannot produce `Self`.
    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>>;
}

fn read_u8(b: &[u8]) -> u32 {
    u32::from(b[0])
}

fn read_u16(b: &[u8]) -> u32 {
    u32::from(u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn read_f32(b: &[u8]) -> f32 {
    f32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn read_vec2(b: &[u8]) -> [f32; 2] {
    [read_f32(&b[0..4]), read_f32(&b[4..8])]
}

fn read_vec3(b: &[u8]) -> [f32; 3] {
    [read_f32(&b[0..4]), read_f32(&b[4..8]), read_f32(&b[8..12])]
}

fn read_vec4(b: &[u8]) -> [f32; 4] {
    [
        read_f32(&b[0..4]),
        read_f32(&b[4..8]),
        read_f32(&b[8..12]),
        read_f32(&b[12..16]),
    ]
}

/// Indices: any unsigned scalar, widened to `u32`.
impl Element for u32 {
    const NAME: &'static str = "index";

    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>> {
        let decode: Decode<Self> = match (component, shape) {
            (ComponentType::U8, Shape::Scalar) => read_u8,
            (ComponentType::U16, Shape::Scalar) => read_u16,
            (ComponentType::U32, Shape::Scalar) => read_u32,
            _ => return None,
        };
        Some(decode)
    }
}

impl Element for f32 {
    const NAME: &'static str = "float";

    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>> {
        let decode: Decode<Self> = match (component, shape) {
            (ComponentType::F32, Shape::Scalar) => read_f32,
            _ => return None,
        };
        Some(decode)
    }
}

impl Element for [f32; 2] {
    const NAME: &'static str = "vec2<f32>";

    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>> {
        let decode: Decode<Self> = match (component, shape) {
            (ComponentType::F32, Shape::Vec2) => read_vec2,
            _ => return None,
        };
        Some(decode)
    }
}

impl Element for [f32; 3] {
    const NAME: &'static str = "vec3<f32>";

    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>> {
        let decode: Decode<Self> = match (component, shape) {
            (ComponentType::F32, Shape::Vec3) => read_vec3,
            _ => return None,
        };
        Some(decode)
    }
}

impl Element for [f32; 4] {
    const NAME: &'static str = "vec4<f32>";

    fn decoder(component: ComponentType, shape: Shape) -> Option<Decode<Self>> {
        let decode: Decode<Self> = match (component, shape) {
            (ComponentType::F32, Shape::Vec4) => read_vec4,
            _ => return None,
        };
        Some(decode)
    }
}

/// Lazy iterator over the decoded elements of one accessor.
#[derive(Clone)]
pub(crate) struct Elements<'a, T> {
    view: DataView<'a>,
    next: usize,
    decode: Decode<T>,
}

impl<'a, T: Element> Elements<'a, T> {
    /// Decode `view` as `T`, given the accessor's declared layout.
    pub fn new(
        view: DataView<'a>,
        component: ComponentType,
        shape: Shape,
        accessor: usize,
    ) -> Result<Self, AccessorError> {
        let decode = T::decoder(component, shape).ok_or_else(|| AccessorError::Unsupported {
            accessor,
            reason: format!("{component:?} {shape:?} cannot be read as {}", T::NAME),
        })?;
        Ok(Self {
            view,
            next: 0,
            decode,
        })
    }
}

impl<T> Iterator for Elements<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next >= self.view.count() {
            return None;
        }
        let bytes = self.view.element(self.next);
        self.next += 1;
        Some((self.decode)(bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.count() - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Elements<'_, T> {}

/// Validated layout of a glTF accessor.
fn layout(accessor: &gltf_dep::Accessor<'_>) -> Result<(ComponentType, Shape), AccessorError> {
    let unsupported = |reason: String| AccessorError::Unsupported {
        accessor: accessor.index(),
        reason,
    };

    if accessor.sparse().is_some() {
        return Err(unsupported("sparse accessors are not supported".into()));
    }
    if accessor.normalized() {
        return Err(unsupported(format!(
            "normalized {:?} components are not supported",
            accessor.data_type()
        )));
    }
    let component = ComponentType::from_gltf(accessor.data_type()).ok_or_else(|| {
        unsupported(format!(
            "component type {:?} is not supported",
            accessor.data_type()
        ))
    })?;
    let shape = Shape::from_gltf(accessor.dimensions()).ok_or_else(|| {
        unsupported(format!(
            "element type {:?} is not supported",
            accessor.dimensions()
        ))
    })?;
    Ok((component, shape))
}

/// Read an accessor as a lazy sequence of `T`.
///
/// The layout is checked against the dispatch table before the byte range is
/// resolved, and the byte range is checked before anything is decoded.
pub(crate) fn read<'a, T: Element>(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &'a [Vec<u8>],
) -> Result<Elements<'a, T>, AccessorError> {
    let (component, shape) = layout(accessor)?;
    if T::decoder(component, shape).is_none() {
        return Err(AccessorError::Unsupported {
            accessor: accessor.index(),
            reason: format!("{component:?} {shape:?} cannot be read as {}", T::NAME),
        });
    }
    let element_size = component.size() * shape.components();
    let view = buffer::resolve_accessor(accessor, buffers, element_size)?;
    Elements::new(view, component, shape, accessor.index())
}

/// Read an index accessor, widening every index to `u32`.
pub(crate) fn read_indices<'a>(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &'a [Vec<u8>],
) -> Result<Elements<'a, u32>, AccessorError> {
    read::<u32>(accessor, buffers)
}
