/// Decoded texture pixels held on the CPU.
///
/// Pixels are 8 bits per channel, row-major, `channels` bytes per pixel.
/// Textures are shared between materials through `Arc<Texture>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Source name (image name or path), for debugging.
    pub name: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA).
    pub channels: u8,
    /// Raw pixel bytes, `width * height * channels` long.
    pub data: Vec<u8>,
}

impl Texture {
    /// Create a texture from already decoded pixels.
    pub fn new(name: Option<String>, width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels as usize
        );
        Self {
            name,
            width,
            height,
            channels,
            data,
        }
    }

    /// Bytes in one row of pixels.
    pub fn row_pitch(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}
