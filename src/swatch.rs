use crate::{
    brightness::Brightness,
    error::{Error, Result},
    histogram::BucketStats,
};
use palette::Srgb;
use std::fmt;

/// One entry of an extracted palette: a bucket color with its share of the sampled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    red: u8,
    green: u8,
    blue: u8,
    count: u64,
    percentage: f64,
}

/// An HSL color with integer degrees and percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Swatch {
    /// Report `stats` against the number of samples the whole extraction took. A zero total reports 0%.
    pub fn new(stats: &BucketStats, total_sampled: u64) -> Swatch {
        let (red, green, blue) = stats.rgb();
        let percentage = if total_sampled == 0 {
            0.0
        } else {
            stats.count() as f64 / total_sampled as f64 * 100.0
        };

        Self {
            red,
            green,
            blue,
            count: stats.count(),
            percentage,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn count(self) -> u64 {
        self.count
    }

    /// Share of the sampled, non-transparent pixels in this swatch's bucket, from 0 to 100. Not rounded.
    pub fn percentage(self) -> f64 {
        self.percentage
    }

    /// `#rrggbb`, lowercase.
    pub fn hex(self) -> String {
        to_hex(self.rgb())
    }

    /// `rgb(r, g, b)`.
    pub fn css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }

    pub fn hsl(self) -> Hsl {
        rgb_to_hsl(self.rgb())
    }

    /// `hsl(h, s%, l%)`.
    pub fn css_hsl(self) -> String {
        self.hsl().to_string()
    }

    pub fn brightness(self) -> Brightness {
        Brightness::of_rgb(self.rgb())
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

pub fn to_hex((red, green, blue): (u8, u8, u8)) -> String {
    format!("#{red:02x}{green:02x}{blue:02x}")
}

/// Parse a `#rrggbb` hex color (the leading `#` is optional).
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let color: Srgb<u8> = hex.parse().map_err(|source| Error::InvalidHex {
        value: hex.to_string(),
        source,
    })?;

    Ok(color.into_components())
}

/// Convert to HSL, rounding hue to whole degrees in `0..360` and saturation and lightness to whole percent.
///
/// All three are computed as exact fractions of the channel values and rounded half up, so ties such as 22.5°
/// always land on the same side.
pub fn rgb_to_hsl((red, green, blue): (u8, u8, u8)) -> Hsl {
    let (r, g, b) = (red as i64, green as i64, blue as i64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let sum = max + min;

    // L = sum / 510
    let lightness = round_half_up(100 * sum, 2 * 255);

    if delta == 0 {
        return Hsl {
            hue: 0,
            saturation: 0,
            lightness: lightness as u8,
        };
    }

    // S = delta / (510 - sum) above half lightness, delta / sum otherwise
    let saturation_denominator = if sum > 255 { 2 * 255 - sum } else { sum };
    let saturation = round_half_up(100 * delta, saturation_denominator);

    // H = 60 * (offset + distance between the other two channels / delta), in degrees
    let numerator = if max == r {
        60 * (g - b)
    } else if max == g {
        60 * (b - r) + 120 * delta
    } else {
        60 * (r - g) + 240 * delta
    };
    let numerator = numerator.rem_euclid(360 * delta);
    let hue = round_half_up(numerator, delta) % 360;

    Hsl {
        hue: hue as u16,
        saturation: saturation as u8,
        lightness: lightness as u8,
    }
}

/// `numerator / denominator` rounded to the nearest integer, halves up. Both must be non-negative.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        histogram::Histogram,
        quantizer::{quantize, quantize_channel},
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn stats_for(rgb: (u8, u8, u8), count: usize) -> BucketStats {
        let mut hist = Histogram::new();
        for index in 0..count {
            hist.record(index, quantize(rgb));
        }

        hist.rank(1)[0]
    }

    #[test]
    fn formats_hex() {
        assert_eq!(to_hex((255, 255, 255)), "#ffffff");
        assert_eq!(to_hex((0, 0, 0)), "#000000");
        assert_eq!(to_hex((10, 160, 1)), "#0aa001");
    }

    #[test]
    fn hex_round_trips_for_every_bucket() {
        let channels: BTreeSet<u8> = (0..=u8::MAX).map(quantize_channel).collect();
        assert_eq!(channels.len(), 11);

        for &red in &channels {
            for &green in &channels {
                for &blue in &channels {
                    let hex = to_hex((red, green, blue));
                    let decoded = parse_hex(&hex).unwrap();

                    assert_eq!(decoded, (red, green, blue));
                    assert_eq!(to_hex(decoded), hex);
                }
            }
        }
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(parse_hex("#12345"), Err(Error::InvalidHex { .. })));
        assert!(matches!(parse_hex("#gg0000"), Err(Error::InvalidHex { .. })));
    }

    #[test]
    fn hsl_boundary_cases() {
        assert_eq!(rgb_to_hsl((255, 0, 0)).to_string(), "hsl(0, 100%, 50%)");
        assert_eq!(rgb_to_hsl((255, 255, 255)).to_string(), "hsl(0, 0%, 100%)");
        assert_eq!(rgb_to_hsl((0, 0, 0)).to_string(), "hsl(0, 0%, 0%)");

        let gray = rgb_to_hsl((128, 128, 128));
        assert_eq!(gray.hue, 0);
        assert_eq!(gray.saturation, 0);
        assert_eq!(gray.lightness, 50);
    }

    #[test]
    fn hsl_hue_follows_the_max_channel() {
        assert_eq!(rgb_to_hsl((0, 255, 0)).hue, 120);
        assert_eq!(rgb_to_hsl((0, 0, 255)).hue, 240);
        assert_eq!(rgb_to_hsl((255, 255, 0)).hue, 60);
        assert_eq!(rgb_to_hsl((255, 0, 255)).hue, 300);
        assert_eq!(rgb_to_hsl((0, 255, 255)).hue, 180);
    }

    #[test]
    fn hsl_rounds_half_degrees_up() {
        // exactly 22.5 and 7.5 degrees
        assert_eq!(rgb_to_hsl((192, 72, 0)), Hsl { hue: 23, saturation: 100, lightness: 38 });
        assert_eq!(rgb_to_hsl((240, 72, 48)).hue, 8);
        assert_eq!(round_half_up(65, 2), 33);
        assert_eq!(round_half_up(64, 2), 32);
    }

    #[test]
    fn hsl_for_every_bucket_is_within_half_a_unit() {
        let channels: BTreeSet<u8> = (0..=u8::MAX).map(quantize_channel).collect();

        for &red in &channels {
            for &green in &channels {
                for &blue in &channels {
                    let hsl = rgb_to_hsl((red, green, blue));
                    let (r, g, b) = (red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0);
                    let max = r.max(g).max(b);
                    let min = r.min(g).min(b);
                    let delta = max - min;
                    let lightness = (max + min) / 2.0;

                    assert!(hsl.hue < 360);
                    assert!((hsl.lightness as f64 - lightness * 100.0).abs() <= 0.5 + 1e-9);

                    if delta == 0.0 {
                        assert_eq!((hsl.hue, hsl.saturation), (0, 0));
                        continue;
                    }

                    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
                    assert!((hsl.saturation as f64 - saturation * 100.0).abs() <= 0.5 + 1e-9);

                    let hue = (if max == r {
                        60.0 * ((g - b) / delta)
                    } else if max == g {
                        60.0 * ((b - r) / delta + 2.0)
                    } else {
                        60.0 * ((r - g) / delta + 4.0)
                    })
                    .rem_euclid(360.0);
                    let distance = (hsl.hue as f64 - hue).abs();
                    assert!(
                        distance.min(360.0 - distance) <= 0.5 + 1e-9,
                        "{:?} gave {:?}, expected about {}",
                        (red, green, blue),
                        hsl,
                        hue
                    );
                }
            }
        }
    }

    #[test]
    fn hsl_hue_stays_below_360() {
        // 255, 0, 1 sits at roughly 359.76 degrees
        assert_eq!(rgb_to_hsl((255, 0, 1)).hue, 0);
    }

    #[test]
    fn reports_css_strings() {
        let swatch = Swatch::new(&stats_for((240, 48, 0), 3), 12);

        assert_eq!(swatch.hex(), "#f03000");
        assert_eq!(swatch.to_string(), "#f03000");
        assert_eq!(swatch.css_rgb(), "rgb(240, 48, 0)");
        assert_eq!(swatch.css_hsl(), "hsl(12, 100%, 47%)");
        assert_eq!(swatch.count(), 3);
        assert_eq!(swatch.percentage(), 25.0);
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let swatch = Swatch::new(&stats_for((0, 0, 0), 1), 0);

        assert_eq!(swatch.percentage(), 0.0);
    }
}
