// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a ranked palette of dominant colors from an image.
//!
//! Extraction is a single pass over a borrowed RGBA8 buffer: every `stride`th pixel is sampled, pixels below
//! [`ALPHA_THRESHOLD`] are dropped, each remaining color is quantized to a [`Bucket`] on a fixed grid of
//! [`BUCKET_WIDTH`], and the buckets are ranked by how often they occur. Ties rank in the order the buckets were
//! first seen, so the same input always produces the same palette.
//!
//! ```
//! use prevalence::{Palette, PixelBuffer};
//!
//! let pixels = [
//!     255, 0, 0, 255, //
//!     255, 0, 0, 255, //
//!     0, 255, 0, 255, //
//!     0, 0, 255, 255,
//! ];
//! let buffer = PixelBuffer::new(&pixels, 2, 2)?;
//! let palette = Palette::from_buffer(buffer).max_colors(3).generate()?;
//!
//! assert_eq!(palette.len(), 3);
//! assert_eq!(palette.swatches()[0].hex(), "#f00000");
//! assert_eq!(palette.swatches()[0].percentage(), 50.0);
//! # Ok::<(), prevalence::Error>(())
//! ```

mod brightness;
mod buffer;
mod error;
mod histogram;
mod quantizer;
mod sampler;
mod swatch;

pub const DEFAULT_MAX_COLORS: usize = 16;
pub const DEFAULT_STRIDE: usize = 1;

pub use crate::{
    brightness::{brightness, brightness_of_hex, Brightness, LIGHT_THRESHOLD},
    buffer::PixelBuffer,
    error::{Error, Result},
    histogram::{rank, BucketStats, Histogram},
    quantizer::{quantize, quantize_channel, Bucket, BUCKET_WIDTH},
    sampler::{Indexed, Sampler, ALPHA_THRESHOLD},
    swatch::{parse_hex, rgb_to_hsl, to_hex, Hsl, Swatch},
};
pub use image;
pub use palette;

use image::RgbaImage;

/// Parameters of one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractOptions {
    /// Sample every `stride`th pixel. Must be at least 1.
    pub stride: usize,
    /// Upper bound on the number of swatches. Zero yields an empty palette.
    pub max_colors: usize,
    /// Aggregate across the rayon thread pool. Only has an effect with the `rayon` feature.
    pub parallel: bool,
}

impl ExtractOptions {
    /// Reject a zero stride.
    pub fn validate(self) -> Result<Self> {
        if self.stride == 0 {
            return Err(Error::InvalidStride);
        }

        Ok(self)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            max_colors: DEFAULT_MAX_COLORS,
            parallel: false,
        }
    }
}

/// A ranked palette: swatches ordered by how many sampled pixels fell into their bucket, most first.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    swatches: Vec<Swatch>,
    total_sampled: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct PaletteBuilder<'a> {
    buffer: PixelBuffer<'a>,
    options: ExtractOptions,
}

impl Palette {
    pub fn from_buffer(buffer: PixelBuffer<'_>) -> PaletteBuilder<'_> {
        PaletteBuilder::from_buffer(buffer)
    }

    pub fn from_image(image: &RgbaImage) -> PaletteBuilder<'_> {
        PaletteBuilder::from_buffer(PixelBuffer::from_image(image))
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// How many non-transparent pixels were sampled. Every swatch percentage is relative to this.
    pub fn total_sampled(&self) -> u64 {
        self.total_sampled
    }

    pub fn most_prominent(&self) -> Option<Swatch> {
        self.swatches.first().copied()
    }

    pub fn most_prominent_color(&self) -> Option<(u8, u8, u8)> {
        self.most_prominent().map(|swatch| swatch.rgb())
    }

    /// Render the palette as CSS custom properties, `--color-1` being the most prominent swatch.
    pub fn to_css_variables(&self) -> String {
        let properties: String = self
            .swatches
            .iter()
            .enumerate()
            .map(|(i, swatch)| format!("  --color-{}: {};\n", i + 1, swatch.hex()))
            .collect();

        format!(":root {{\n{properties}}}\n")
    }

    fn generate(ranked: Vec<BucketStats>, total_sampled: u64) -> Palette {
        let swatches = ranked
            .iter()
            .map(|stats| Swatch::new(stats, total_sampled))
            .collect();

        Self {
            swatches,
            total_sampled,
        }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> PaletteBuilder<'a> {
    pub fn from_buffer(buffer: PixelBuffer<'a>) -> Self {
        Self {
            buffer,
            options: ExtractOptions::default(),
        }
    }

    pub fn max_colors(self, max_colors: usize) -> Self {
        Self {
            options: ExtractOptions {
                max_colors,
                ..self.options
            },
            ..self
        }
    }

    pub fn stride(self, stride: usize) -> Self {
        Self {
            options: ExtractOptions { stride, ..self.options },
            ..self
        }
    }

    pub fn parallel(self, parallel: bool) -> Self {
        Self {
            options: ExtractOptions {
                parallel,
                ..self.options
            },
            ..self
        }
    }

    pub fn options(self, options: ExtractOptions) -> Self {
        Self { options, ..self }
    }

    pub fn generate(self) -> Result<Palette> {
        let options = self.options.validate()?;
        let hist = self.aggregate(options)?;
        let total_sampled = hist.total();

        log::debug!(
            "sampled {} of {} pixels at stride {} into {} buckets",
            total_sampled,
            self.buffer.pixel_count(),
            options.stride,
            hist.len()
        );

        Ok(Palette::generate(hist.rank(options.max_colors), total_sampled))
    }

    fn aggregate(&self, options: ExtractOptions) -> Result<Histogram> {
        if options.parallel {
            return self.aggregate_parallel(options);
        }

        Ok(Histogram::from_sampler(Sampler::new(self.buffer, options.stride)?))
    }

    #[cfg(feature = "rayon")]
    fn aggregate_parallel(&self, options: ExtractOptions) -> Result<Histogram> {
        Histogram::from_buffer_parallel(self.buffer, options.stride)
    }

    #[cfg(not(feature = "rayon"))]
    fn aggregate_parallel(&self, options: ExtractOptions) -> Result<Histogram> {
        log::debug!("built without the rayon feature, aggregating sequentially");
        Ok(Histogram::from_sampler(Sampler::new(self.buffer, options.stride)?))
    }
}

/// Extract up to `max_colors` swatches from `buffer`, sampling every `stride`th pixel.
pub fn extract(buffer: PixelBuffer<'_>, stride: usize, max_colors: usize) -> Result<Palette> {
    Palette::from_buffer(buffer)
        .stride(stride)
        .max_colors(max_colors)
        .generate()
}
