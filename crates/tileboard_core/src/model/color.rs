//! Random pastel colors for new and recolored entities.
//!
//! Colors are persisted as CSS-style `hsl(H S% L%)` strings. Values read back
//! from storage are treated as opaque text, so only generation goes through
//! this module.

use rand::Rng;
use std::fmt::{Display, Formatter};

/// One HSL color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HslColor {
    /// Degrees in `0..360`.
    pub hue: u16,
    /// Percent in `0..=100`.
    pub saturation: u8,
    /// Percent in `0..=100`.
    pub lightness: u8,
}

impl Display for HslColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({} {}% {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Saturation/lightness envelope used when picking a random hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub saturation: u8,
    /// Inclusive lower bound.
    pub lightness_min: u8,
    /// Exclusive upper bound; equal to `lightness_min` means fixed lightness.
    pub lightness_max: u8,
}

impl ColorPalette {
    /// Light pastel tiles for the shape gallery.
    pub const GALLERY: Self = Self {
        saturation: 75,
        lightness_min: 65,
        lightness_max: 80,
    };

    /// Very light card backgrounds so titles stay readable.
    pub const BOARD: Self = Self {
        saturation: 70,
        lightness_min: 85,
        lightness_max: 85,
    };

    /// Draws one color: uniform hue, lightness uniform in the palette range.
    pub fn random_color(&self, rng: &mut impl Rng) -> HslColor {
        let hue = rng.random_range(0..360u16);
        let lightness = if self.lightness_max > self.lightness_min {
            rng.random_range(self.lightness_min..self.lightness_max)
        } else {
            self.lightness_min
        };
        HslColor {
            hue,
            saturation: self.saturation.min(100),
            lightness: lightness.min(100),
        }
    }
}
