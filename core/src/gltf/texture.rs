//! Texture resolution: glTF texture → shared, decoded [`Texture`].
//!
//! File-referenced images are percent-decoded, resolved against the model
//! directory, read through the [`VfsProvider`] and cached in a [`TextureCache`]
//! keyed by the resolved path. Embedded images (buffer view or `data:` URI) are
//! decoded on every request and never cached.

use std::sync::Arc;

use image::GenericImageView;
use redlilium_vfs::VfsProvider;

use crate::texture::{Texture, TextureCache};

use super::buffer;
use super::error::TextureError;

/// Resolves glTF textures for one load.
pub(crate) struct TextureResolver<'a> {
    pub buffers: &'a [Vec<u8>],
    pub provider: &'a dyn VfsProvider,
    pub directory: &'a str,
    pub cache: &'a TextureCache,
}

impl TextureResolver<'_> {
    /// Resolve the image behind `texture`.
    pub fn resolve(&self, texture: &gltf_dep::Texture<'_>) -> Result<Arc<Texture>, TextureError> {
        let image = texture.source();
        let label = image
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("image {}", image.index()));

        match image.source() {
            gltf_dep::image::Source::View { view, .. } => {
                let bytes = self.view_bytes(&view).map_err(|reason| TextureError::Decode {
                    image: label.clone(),
                    reason,
                })?;
                decode_image(bytes, &label).map(Arc::new)
            }
            gltf_dep::image::Source::Uri { uri, .. } => match buffer::decode_data_uri(uri) {
                Some(decoded) => {
                    let bytes = decoded.map_err(|reason| TextureError::Decode {
                        image: label.clone(),
                        reason,
                    })?;
                    decode_image(&bytes, &label).map(Arc::new)
                }
                None => self.resolve_file(uri),
            },
        }
    }

    fn resolve_file(&self, uri: &str) -> Result<Arc<Texture>, TextureError> {
        let resolved =
            buffer::resolve_uri(self.directory, uri).map_err(|source| TextureError::NotFound {
                path: uri.to_owned(),
                source,
            })?;

        self.cache.get_or_try_insert_with(&resolved, || {
            let bytes = self
                .provider
                .read(&resolved)
                .map_err(|source| TextureError::NotFound {
                    path: resolved.clone(),
                    source,
                })?;
            decode_image(&bytes, &resolved)
        })
    }

    fn view_bytes(&self, view: &gltf_dep::buffer::View<'_>) -> Result<&[u8], String> {
        let buffer_index = view.buffer().index();
        let data = self
            .buffers
            .get(buffer_index)
            .ok_or_else(|| format!("buffer index {buffer_index} out of range"))?;
        view.offset()
            .checked_add(view.length())
            .and_then(|end| data.get(view.offset()..end))
            .ok_or_else(|| {
                format!(
                    "buffer view {} exceeds buffer {buffer_index} of {} bytes",
                    view.index(),
                    data.len()
                )
            })
    }
}

/// Decode encoded image bytes (PNG, JPEG), keeping the source channel count.
pub(crate) fn decode_image(bytes: &[u8], name: &str) -> Result<Texture, TextureError> {
    let img = image::load_from_memory(bytes).map_err(|e| TextureError::Decode {
        image: name.to_owned(),
        reason: e.to_string(),
    })?;

    let (width, height) = img.dimensions();
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.into_luma8().into_raw()),
        2 => (2, img.into_luma_alpha8().into_raw()),
        3 => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    };

    Ok(Texture::new(Some(name.to_owned()), width, height, channels, data))
}
