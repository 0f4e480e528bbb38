//! Loader tests built on synthetic documents.
//!
//! [`DocBuilder`] packs attribute data into a single binary buffer and emits
//! the matching glTF JSON, either as a `.gltf` with a base64 data-URI (or
//! external) buffer, or as a `.glb` container.

use std::io::Cursor;

use base64::Engine as _;
use serde_json::{json, Value};


pub(super) const U8: u32 = 5121;
pub(super) const U16: u32 = 5123;
pub(super) const U32: u32 = 5125;
pub(super) const F32: u32 = 5126;

/// Incrementally built glTF document backed by one binary buffer.
#[derive(Default)]
pub(super) struct DocBuilder {
    bin: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
    materials: Vec<Value>,
    textures: Vec<Value>,
    images: Vec<Value>,
    asset: Option<Value>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the `asset` object (defaults to version 2.0).
    pub fn asset(mut self, asset: Value) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Append `bytes` as a new 4-byte aligned buffer view.
    pub fn view(&mut self, bytes: &[u8], stride: Option<usize>) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let mut view = json!({
            "buffer": 0,
            "byteOffset": self.bin.len(),
            "byteLength": bytes.len(),
        });
        if let Some(stride) = stride {
            view["byteStride"] = json!(stride);
        }
        self.bin.extend_from_slice(bytes);
        self.views.push(view);
        self.views.len() - 1
    }

    /// Append a raw accessor.
    pub fn accessor(
        &mut self,
        view: usize,
        byte_offset: usize,
        component_type: u32,
        count: usize,
        type_: &str,
    ) -> usize {
        self.accessors.push(json!({
            "bufferView": view,
            "byteOffset": byte_offset,
            "componentType": component_type,
            "count": count,
            "type": type_,
        }));
        self.accessors.len() - 1
    }

    /// Mark accessor `index` as normalized.
    pub fn normalized(&mut self, index: usize) {
        self.accessors[index]["normalized"] = json!(true);
    }

    /// POSITION accessor with the `min`/`max` bounds glTF requires.
    pub fn positions(&mut self, positions: &[[f32; 3]]) -> usize {
        let accessor = self.floats(positions, "VEC3");
        let (min, max) = bounds(positions);
        self.accessors[accessor]["min"] = json!(min);
        self.accessors[accessor]["max"] = json!(max);
        accessor
    }

    /// Tightly packed float accessor of the given element type.
    pub fn floats<const N: usize>(&mut self, data: &[[f32; N]], type_: &str) -> usize {
        let bytes: Vec<u8> = data
            .iter()
            .flatten()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let view = self.view(&bytes, None);
        self.accessor(view, 0, F32, data.len(), type_)
    }

    pub fn indices_u8(&mut self, indices: &[u8]) -> usize {
        let view = self.view(indices, None);
        self.accessor(view, 0, U8, indices.len(), "SCALAR")
    }

    pub fn indices_u16(&mut self, indices: &[u16]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let view = self.view(&bytes, None);
        self.accessor(view, 0, U16, indices.len(), "SCALAR")
    }

    pub fn indices_u32(&mut self, indices: &[u32]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let view = self.view(&bytes, None);
        self.accessor(view, 0, U32, indices.len(), "SCALAR")
    }

    /// Append a mesh made of the given primitive objects.
    pub fn mesh(&mut self, name: Option<&str>, primitives: Vec<Value>) -> usize {
        let mut mesh = json!({ "primitives": primitives });
        if let Some(name) = name {
            mesh["name"] = json!(name);
        }
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Append a mesh with one primitive using only POSITION.
    pub fn simple_mesh(&mut self, positions: &[[f32; 3]]) -> usize {
        let position = self.positions(positions);
        self.mesh(None, vec![json!({ "attributes": { "POSITION": position } })])
    }

    pub fn material(&mut self, material: Value) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Image referenced by URI (a relative path or a data URI).
    pub fn image_uri(&mut self, uri: &str) -> usize {
        self.images.push(json!({ "uri": uri }));
        self.images.len() - 1
    }

    /// Image embedded as a PNG data URI.
    pub fn image_data_uri(&mut self, png: &[u8]) -> usize {
        let uri = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        );
        self.image_uri(&uri)
    }

    /// Image stored in a buffer view of the binary buffer.
    pub fn image_view(&mut self, png: &[u8]) -> usize {
        let view = self.view(png, None);
        self.images.push(json!({ "bufferView": view, "mimeType": "image/png" }));
        self.images.len() - 1
    }

    pub fn texture(&mut self, image: usize) -> usize {
        self.textures.push(json!({ "source": image }));
        self.textures.len() - 1
    }

    fn root(&self, buffer: Value) -> Value {
        let mut root = json!({
            "asset": self.asset.clone().unwrap_or_else(|| json!({ "version": "2.0" })),
            "buffers": [buffer],
            "bufferViews": self.views,
            "accessors": self.accessors,
            "meshes": self.meshes,
        });
        for (key, list) in [
            ("materials", &self.materials),
            ("textures", &self.textures),
            ("images", &self.images),
        ] {
            if !list.is_empty() {
                root[key] = json!(list);
            }
        }
        root
    }

    /// `.gltf` JSON with the buffer embedded as a data URI.
    pub fn to_gltf(&self) -> Vec<u8> {
        let uri = format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.bin)
        );
        self.root(json!({ "byteLength": self.bin.len(), "uri": uri }))
            .to_string()
            .into_bytes()
    }

    /// `.gltf` JSON referencing the buffer at `uri`, plus the buffer bytes.
    pub fn to_gltf_external(&self, uri: &str) -> (Vec<u8>, Vec<u8>) {
        let json = self
            .root(json!({ "byteLength": self.bin.len(), "uri": uri }))
            .to_string()
            .into_bytes();
        (json, self.bin.clone())
    }

    /// Binary `.glb` container.
    pub fn to_glb(&self) -> Vec<u8> {
        let mut json = self
            .root(json!({ "byteLength": self.bin.len() }))
            .to_string()
            .into_bytes();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let mut bin = self.bin.clone();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }

        let total = 12 + 8 + json.len() + 8 + bin.len();
        let mut glb = Vec::with_capacity(total);
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"JSON");
        glb.extend_from_slice(&json);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"BIN\0");
        glb.extend_from_slice(&bin);
        glb
    }
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    if positions.is_empty() {
        return ([0.0; 3], [0.0; 3]);
    }
    (min, max)
}

/// A solid-color RGBA PNG.
pub(super) fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("PNG encoding");
    bytes
}

/// Three corners of a right triangle in the XY plane.
pub(super) const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Four corners of a unit quad in the XY plane.
pub(super) const QUAD: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];
