/// Width of one quantization step on each channel.
pub const BUCKET_WIDTH: u8 = 24;

// Highest step that still lands inside 0..=255.
const MAX_STEP: u8 = u8::MAX / BUCKET_WIDTH;

/// A coarse RGB color whose channels are all multiples of [`BUCKET_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    red: u8,
    green: u8,
    blue: u8,
}

impl Bucket {
    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Pack the channels into a single integer, red most significant.
    pub fn key(self) -> u32 {
        (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }

    pub fn from_key(key: u32) -> Self {
        Self {
            red: (key >> 16) as u8,
            green: (key >> 8) as u8,
            blue: key as u8,
        }
    }
}

/// Quantize one color to its bucket.
pub fn quantize((red, green, blue): (u8, u8, u8)) -> Bucket {
    Bucket {
        red: quantize_channel(red),
        green: quantize_channel(green),
        blue: quantize_channel(blue),
    }
}

/// Round a channel to the nearest multiple of [`BUCKET_WIDTH`], halves rounding up.
///
/// Values that would round past 255 stay on the highest in-range multiple (240).
pub fn quantize_channel(value: u8) -> u8 {
    let step = (value as u16 + BUCKET_WIDTH as u16 / 2) / BUCKET_WIDTH as u16;
    (step as u8).min(MAX_STEP) * BUCKET_WIDTH
}
