//! Light/dark classification using the HSP perceived-brightness model.

use crate::{error::Result, swatch::parse_hex};

/// Brightness above this classifies as light. Exactly this value is dark.
pub const LIGHT_THRESHOLD: f64 = 127.5;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Whether a color reads as light or dark, used to pick a legible overlay for a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Brightness {
    Light,
    Dark,
}

impl Brightness {
    pub fn classify(brightness: f64) -> Brightness {
        if brightness > LIGHT_THRESHOLD {
            Brightness::Light
        } else {
            Brightness::Dark
        }
    }

    pub fn of_rgb(rgb: (u8, u8, u8)) -> Brightness {
        Self::classify(brightness(rgb))
    }

    /// Classify a `#rrggbb` hex color.
    pub fn of_hex(hex: &str) -> Result<Brightness> {
        parse_hex(hex).map(Self::of_rgb)
    }

    pub fn is_light(self) -> bool {
        self == Brightness::Light
    }

    /// The overlay color that stays legible on top of a color of this brightness: black on light, white on dark.
    pub fn overlay_rgb(self) -> (u8, u8, u8) {
        match self {
            Brightness::Light => (0, 0, 0),
            Brightness::Dark => (255, 255, 255),
        }
    }
}

/// HSP brightness, `sqrt(0.299 R² + 0.587 G² + 0.114 B²)`, in `0.0..=255.0`.
pub fn brightness((red, green, blue): (u8, u8, u8)) -> f64 {
    let (red, green, blue) = (red as f64, green as f64, blue as f64);

    (RED_WEIGHT * red * red + GREEN_WEIGHT * green * green + BLUE_WEIGHT * blue * blue).sqrt()
}

/// Classify a `#rrggbb` hex color, see [`Brightness::of_hex`].
pub fn brightness_of_hex(hex: &str) -> Result<Brightness> {
    Brightness::of_hex(hex)
}
