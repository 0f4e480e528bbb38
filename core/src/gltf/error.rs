//! Error types for glTF loading.

use std::fmt;

use redlilium_vfs::VfsError;

use crate::material::TextureSlot;

/// Category of a [`LoadError`], for callers that only need to branch on the
/// kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unreadable container, JSON or buffer.
    Parse,
    /// The document declares a glTF version other than 2.x.
    UnsupportedVersion,
    /// A buffer view, accessor or index reaches past its backing bytes.
    OutOfRange,
    /// Accessor component type / shape outside the supported matrix.
    UnsupportedComponentType,
    /// A primitive lacks its POSITION stream.
    MissingRequiredAttribute,
    /// Sibling vertex attribute accessors disagree on element count.
    AttributeCountMismatch,
    /// Primitive mode that has no [`PrimitiveTopology`](crate::mesh::PrimitiveTopology).
    UnsupportedTopology,
}

/// Fatal errors that abort a model load. No partial model is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to parse the binary container or validate the document.
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf_dep::Error),
    /// The JSON chunk is not a well-formed glTF document.
    #[error("glTF JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The source file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path of the source as given to the loader.
        path: String,
        /// Underlying provider error.
        #[source]
        source: VfsError,
    },
    /// A buffer could not be resolved or is shorter than it declares.
    #[error("buffer {buffer}: {reason}")]
    Buffer {
        /// Buffer index in the glTF document.
        buffer: usize,
        /// What went wrong.
        reason: String,
    },
    /// The document declares an incompatible format version.
    #[error("unsupported glTF version '{version}' (only 2.x is supported)")]
    UnsupportedVersion {
        /// Declared `asset.version` (or `asset.minVersion`).
        version: String,
    },
    /// A primitive is missing a mandatory attribute.
    #[error("mesh {mesh} primitive {primitive} has no {attribute} attribute")]
    MissingRequiredAttribute {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
        /// Attribute semantic name.
        attribute: &'static str,
    },
    /// A vertex attribute accessor has a different count than POSITION.
    #[error(
        "mesh {mesh} primitive {primitive}: {attribute} accessor {accessor} has {found} elements, POSITION has {expected}"
    )]
    AttributeCountMismatch {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
        /// Attribute semantic name.
        attribute: &'static str,
        /// Offending accessor index.
        accessor: usize,
        /// POSITION element count.
        expected: usize,
        /// Element count of the offending accessor.
        found: usize,
    },
    /// Accessor data or an index value reaches outside its valid range.
    #[error("mesh {mesh} primitive {primitive}: accessor {accessor} out of range: {reason}")]
    OutOfRange {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
        /// Offending accessor index.
        accessor: usize,
        /// What exceeded which bound.
        reason: String,
    },
    /// Accessor layout is outside the supported component/shape matrix.
    #[error("mesh {mesh} primitive {primitive}: accessor {accessor} unsupported: {reason}")]
    UnsupportedComponentType {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
        /// Offending accessor index.
        accessor: usize,
        /// Description of the unsupported layout.
        reason: String,
    },
    /// Primitive mode without an engine topology.
    #[error("mesh {mesh} primitive {primitive}: unsupported topology {mode}")]
    UnsupportedTopology {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
        /// glTF primitive mode.
        mode: String,
    },
}

impl LoadError {
    /// Map this error onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) | Self::Json(_) | Self::Read { .. } | Self::Buffer { .. } => {
                ErrorKind::Parse
            }
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::MissingRequiredAttribute { .. } => ErrorKind::MissingRequiredAttribute,
            Self::AttributeCountMismatch { .. } => ErrorKind::AttributeCountMismatch,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::UnsupportedComponentType { .. } => ErrorKind::UnsupportedComponentType,
            Self::UnsupportedTopology { .. } => ErrorKind::UnsupportedTopology,
        }
    }
}

/// Errors raised while resolving or decoding a single accessor.
///
/// The accessor reader does not know which primitive it serves;
/// [`at`](Self::at) attaches that location when the error reaches the
/// geometry extractor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    /// The accessor's bytes do not fit in its buffer view or buffer.
    #[error("accessor {accessor} out of range: {reason}")]
    OutOfRange {
        /// Accessor index in the glTF document.
        accessor: usize,
        /// What exceeded which bound.
        reason: String,
    },
    /// The accessor layout is not in the supported matrix.
    #[error("accessor {accessor} unsupported: {reason}")]
    Unsupported {
        /// Accessor index in the glTF document.
        accessor: usize,
        /// Description of the unsupported layout.
        reason: String,
    },
}

impl AccessorError {
    /// Index of the accessor that failed.
    pub fn accessor(&self) -> usize {
        match self {
            Self::OutOfRange { accessor, .. } | Self::Unsupported { accessor, .. } => *accessor,
        }
    }

    /// Attach the primitive location to produce a fatal [`LoadError`].
    pub fn at(self, mesh: usize, primitive: usize) -> LoadError {
        match self {
            Self::OutOfRange { accessor, reason } => LoadError::OutOfRange {
                mesh,
                primitive,
                accessor,
                reason,
            },
            Self::Unsupported { accessor, reason } => LoadError::UnsupportedComponentType {
                mesh,
                primitive,
                accessor,
                reason,
            },
        }
    }
}

/// Non-fatal texture failures. They never abort a load; see [`LoadWarning`].
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// A file-referenced image could not be located or read.
    #[error("image '{path}' not found: {source}")]
    NotFound {
        /// Resolved (or, if unresolvable, the raw) image path.
        path: String,
        /// Underlying provider error.
        #[source]
        source: VfsError,
    },
    /// Image bytes could not be obtained or decoded.
    #[error("failed to decode image '{image}': {reason}")]
    Decode {
        /// Image name, path or index.
        image: String,
        /// Decoder message.
        reason: String,
    },
}

/// A texture that failed to resolve; its material slot was left empty.
#[derive(Debug)]
pub struct LoadWarning {
    /// Material index in the loaded model.
    pub material: usize,
    /// Slot that was left empty.
    pub slot: TextureSlot,
    /// Texture index in the glTF document.
    pub texture: usize,
    /// Why the texture failed.
    pub error: TextureError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "material {} {} texture {}: {}",
            self.material, self.slot, self.texture, self.error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_error_lifts_with_location() {
        let err = AccessorError::OutOfRange {
            accessor: 3,
            reason: "needs 120 bytes".into(),
        };
        assert_eq!(err.accessor(), 3);

        let lifted = err.at(1, 2);
        assert_eq!(lifted.kind(), ErrorKind::OutOfRange);
        assert!(matches!(
            lifted,
            LoadError::OutOfRange {
                mesh: 1,
                primitive: 2,
                accessor: 3,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_accessor_maps_to_component_type_kind() {
        let err = AccessorError::Unsupported {
            accessor: 0,
            reason: "Mat4".into(),
        };
        assert_eq!(err.at(0, 0).kind(), ErrorKind::UnsupportedComponentType);
    }

    #[test]
    fn display_names_location() {
        let err = LoadError::AttributeCountMismatch {
            mesh: 0,
            primitive: 1,
            attribute: "NORMAL",
            accessor: 4,
            expected: 5,
            found: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("mesh 0 primitive 1"));
        assert!(msg.contains("NORMAL accessor 4"));
    }

    #[test]
    fn warning_display() {
        let warning = LoadWarning {
            material: 2,
            slot: TextureSlot::BaseColor,
            texture: 0,
            error: TextureError::Decode {
                image: "albedo".into(),
                reason: "bad header".into(),
            },
        };
        assert_eq!(
            warning.to_string(),
            "material 2 base color texture 0: failed to decode image 'albedo': bad header"
        );
    }
}
