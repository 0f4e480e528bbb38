//! Buffer resolution: buffer → buffer view → accessor byte windows.
//!
//! [`resolve_buffers`] turns every glTF buffer into owned bytes (GLB binary
//! chunk, base64 data URI or external file). [`DataView`] is the range-checked
//! window an accessor reads from: every bound is verified when the view is
//! built, so element access afterwards cannot run past the buffer.

use base64::Engine as _;
use redlilium_vfs::{path, VfsError, VfsProvider};

use super::error::{AccessorError, LoadError};

/// Byte range and stride of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ViewRange {
    pub offset: usize,
    pub length: usize,
    /// Declared stride; `None` or `Some(0)` means tightly packed.
    pub stride: Option<usize>,
}

/// Range-checked, strided window over the bytes of one accessor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DataView<'a> {
    /// Exactly the bytes touched by the accessor: from its first element to the
    /// end of its last one.
    bytes: &'a [u8],
    /// Absolute offset of `bytes` within the buffer.
    start: usize,
    stride: usize,
    element_size: usize,
    count: usize,
}

impl<'a> DataView<'a> {
    /// Build a view of `count` elements of `element_size` bytes starting
    /// `accessor_offset` bytes into `view`.
    ///
    /// Fails (with a human-readable reason) when the view exceeds the buffer,
    /// when the stride is smaller than an element, or when the elements
    /// exceed the view.
    pub fn new(
        buffer: &'a [u8],
        view: ViewRange,
        accessor_offset: usize,
        element_size: usize,
        count: usize,
    ) -> Result<Self, String> {
        let view_end = view
            .offset
            .checked_add(view.length)
            .filter(|&end| end <= buffer.len())
            .ok_or_else(|| {
                format!(
                    "buffer view {}..{} exceeds buffer of {} bytes",
                    view.offset,
                    view.offset.saturating_add(view.length),
                    buffer.len()
                )
            })?;

        let stride = match view.stride {
            Some(stride) if stride > 0 => stride,
            _ => element_size,
        };
        if stride < element_size {
            return Err(format!(
                "stride {stride} is smaller than the {element_size}-byte element"
            ));
        }

        // Bytes needed from the accessor start: (count - 1) strides plus one element.
        let needed = match count {
            0 => Some(0),
            n => (n - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(element_size)),
        };
        let end_in_view = needed.and_then(|needed| accessor_offset.checked_add(needed));
        match end_in_view {
            Some(end) if end <= view.length => {
                let start = view.offset + accessor_offset;
                Ok(Self {
                    bytes: &buffer[start..view.offset + end],
                    start,
                    stride,
                    element_size,
                    count,
                })
            }
            _ => Err(format!(
                "{count} elements of {element_size} bytes (stride {stride}) at offset {accessor_offset} exceed buffer view of {} bytes ending at {view_end}",
                view.length
            )),
        }
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance in bytes between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Absolute byte range within the buffer touched by this view.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.bytes.len()
    }

    /// Raw bytes of element `index`.
    ///
    /// Panics if `index >= count`; in-range elements are always backed by
    /// bytes because the span was checked in [`new`](Self::new).
    pub fn element(&self, index: usize) -> &'a [u8] {
        assert!(index < self.count, "element {index} of {}", self.count);
        let offset = index * self.stride;
        &self.bytes[offset..offset + self.element_size]
    }
}

/// Resolve the data view an accessor reads from.
pub(crate) fn resolve_accessor<'a>(
    accessor: &gltf_dep::Accessor<'_>,
    buffers: &'a [Vec<u8>],
    element_size: usize,
) -> Result<DataView<'a>, AccessorError> {
    let index = accessor.index();
    let view = accessor.view().ok_or_else(|| AccessorError::Unsupported {
        accessor: index,
        reason: "accessor has no buffer view (sparse accessors are not supported)".into(),
    })?;

    let buffer_index = view.buffer().index();
    let buffer = buffers
        .get(buffer_index)
        .ok_or_else(|| AccessorError::OutOfRange {
            accessor: index,
            reason: format!("buffer index {buffer_index} out of range"),
        })?;

    let range = ViewRange {
        offset: view.offset(),
        length: view.length(),
        stride: view.stride(),
    };

    let data = DataView::new(buffer, range, accessor.offset(), element_size, accessor.count())
        .map_err(|reason| AccessorError::OutOfRange {
            accessor: index,
            reason: format!("buffer view {}: {reason}", view.index()),
        })?;
    log::trace!(
        "accessor {index}: buffer {buffer_index} bytes {:?}, stride {}",
        data.byte_range(),
        data.stride()
    );
    Ok(data)
}

/// Resolve all buffer data from the glTF document.
///
/// For binary glTF (.glb), the `Bin` buffer is the embedded blob. Data URIs are
/// decoded in place, other URIs are read through `provider` relative to
/// `directory`. Each buffer is truncated to its declared `byteLength` (GLB
/// chunks carry padding); a source shorter than declared is an error.
pub(crate) fn resolve_buffers(
    document: &gltf_dep::Document,
    mut blob: Option<Vec<u8>>,
    provider: &dyn VfsProvider,
    directory: &str,
) -> Result<Vec<Vec<u8>>, LoadError> {
    let mut buffers = Vec::new();

    for buffer in document.buffers() {
        let index = buffer.index();
        let mut data = match buffer.source() {
            gltf_dep::buffer::Source::Bin => blob.take().ok_or_else(|| LoadError::Buffer {
                buffer: index,
                reason: "binary chunk referenced but not present".into(),
            })?,
            gltf_dep::buffer::Source::Uri(uri) => match decode_data_uri(uri) {
                Some(decoded) => decoded.map_err(|reason| LoadError::Buffer {
                    buffer: index,
                    reason,
                })?,
                None => read_external(provider, directory, uri).map_err(|reason| {
                    LoadError::Buffer {
                        buffer: index,
                        reason,
                    }
                })?,
            },
        };

        let declared = buffer.length();
        if data.len() < declared {
            return Err(LoadError::Buffer {
                buffer: index,
                reason: format!(
                    "declares {declared} bytes but its source provides {}",
                    data.len()
                ),
            });
        }
        data.truncate(declared);
        buffers.push(data);
    }

    Ok(buffers)
}

fn read_external(provider: &dyn VfsProvider, directory: &str, uri: &str) -> Result<Vec<u8>, String> {
    let resolved = resolve_uri(directory, uri).map_err(|err| err.to_string())?;
    provider
        .read(&resolved)
        .map_err(|err| format!("cannot read '{resolved}': {err}"))
}

/// Resolve a relative, percent-encoded URI against `directory`.
pub(crate) fn resolve_uri(directory: &str, uri: &str) -> Result<String, VfsError> {
    let decoded = urlencoding::decode(uri)
        .map_err(|err| VfsError::InvalidPath(format!("'{uri}' does not decode to UTF-8: {err}")))?;
    path::join(directory, &decoded)
}

/// Split a `data:` URI into its media type and base64 payload.
///
/// Returns `None` for anything that is not a base64 data URI.
pub(crate) fn data_uri_payload(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    Some((media_type, payload))
}

/// Decode a base64 data URI. `None` when `uri` is not a data URI.
pub(crate) fn decode_data_uri(uri: &str) -> Option<Result<Vec<u8>, String>> {
    let (_, payload) = data_uri_payload(uri)?;
    Some(
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|err| format!("invalid base64 data URI: {err}")),
    )
}
