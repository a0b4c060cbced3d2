use crate::{
    buffer::PixelBuffer,
    error::{Error, Result},
};

/// Samples with an alpha below this are treated as absent: they're skipped and don't count towards the total.
pub const ALPHA_THRESHOLD: u8 = 128;

/// A lazy walk over every `stride`th pixel of a buffer, yielding the RGB of each sufficiently opaque one.
///
/// The sampler only borrows the buffer, so walking the same buffer again with the same stride yields the same
/// sequence.
#[derive(Debug, Clone)]
pub struct Sampler<'a> {
    buffer: PixelBuffer<'a>,
    stride: usize,
    position: usize,
}

/// A [`Sampler`] that also yields the pixel index each sample was taken from.
#[derive(Debug, Clone)]
pub struct Indexed<'a> {
    inner: Sampler<'a>,
}

impl<'a> Sampler<'a> {
    /// Start sampling `buffer` at pixel 0, advancing `stride` pixels each step. A zero stride is rejected.
    pub fn new(buffer: PixelBuffer<'a>, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(Error::InvalidStride);
        }

        Ok(Self {
            buffer,
            stride,
            position: 0,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Yield `(pixel index, rgb)` pairs instead of bare colors.
    pub fn indexed(self) -> Indexed<'a> {
        Indexed { inner: self }
    }

    fn next_sample(&mut self) -> Option<(usize, (u8, u8, u8))> {
        while self.position < self.buffer.pixel_count() {
            let index = self.position;
            self.position = self.position.saturating_add(self.stride);

            if let Some(rgb) = sample_at(&self.buffer, index) {
                return Some((index, rgb));
            }
        }

        None
    }
}

impl Iterator for Sampler<'_> {
    type Item = (u8, u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_sample().map(|(_, rgb)| rgb)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(remaining_positions(&self.buffer, self.position, self.stride)))
    }
}

impl Iterator for Indexed<'_> {
    type Item = (usize, (u8, u8, u8));

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_sample()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// The RGB of the pixel at `index` if it exists and is opaque enough to be sampled.
pub(crate) fn sample_at(buffer: &PixelBuffer<'_>, index: usize) -> Option<(u8, u8, u8)> {
    let [r, g, b, a] = buffer.pixel(index)?;

    if a < ALPHA_THRESHOLD {
        None
    } else {
        Some((r, g, b))
    }
}

/// How many sample positions a stride visits over the whole buffer, transparent pixels included.
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
pub(crate) fn sample_positions(buffer: &PixelBuffer<'_>, stride: usize) -> usize {
    remaining_positions(buffer, 0, stride)
}

fn remaining_positions(buffer: &PixelBuffer<'_>, position: usize, stride: usize) -> usize {
    let left = buffer.pixel_count().saturating_sub(position);
    left.div_ceil(stride)
}
