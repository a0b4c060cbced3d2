use crate::error::{Error, Result};
use image::RgbaImage;

pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// A borrowed, row-major RGBA8 pixel buffer.
///
/// The geometry is checked once on construction so every later access by pixel index stays in bounds.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` × `height` RGBA8 buffer.
    ///
    /// Fails if the byte length isn't a whole number of pixels, or doesn't match the declared dimensions.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let len = data.len();

        if len % BYTES_PER_PIXEL != 0 {
            return Err(Error::BufferLength { len });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL));

        if expected != Some(len) {
            return Err(Error::DimensionMismatch { len, width, height });
        }

        Ok(Self { data, width, height })
    }

    /// Borrow the pixels of a decoded `image` buffer.
    pub fn from_image(image: &'a RgbaImage) -> Self {
        Self {
            data: image.as_raw(),
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / BYTES_PER_PIXEL
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// The RGBA channels of the pixel at `index`, or `None` past the end of the buffer.
    pub fn pixel(&self, index: usize) -> Option<[u8; 4]> {
        let start = index.checked_mul(BYTES_PER_PIXEL)?;
        let end = start.checked_add(BYTES_PER_PIXEL)?;
        let bytes = self.data.get(start..end)?;

        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
