//! RGB colors carried by every entity.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure red, the default bug color.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pink, the default flower color.
    pub const PINK: Self = Self::rgb(255, 175, 175);
    /// Orange, worn by hunters.
    pub const ORANGE: Self = Self::rgb(255, 200, 0);
    /// Yellow, the default coin color.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Blue, the default shell color.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Black, the default rock color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Construct a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel down by `percent` percent, rounding toward zero.
    #[must_use]
    pub fn darkened(self, percent: u8) -> Self {
        let keep = u16::from(100_u8.saturating_sub(percent));
        let scale = |channel: u8| -> u8 {
            let scaled = u16::from(channel).saturating_mul(keep) / 100;
            u8::try_from(scaled).unwrap_or(u8::MAX)
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darkening_by_five_percent() {
        let c = Color::rgb(200, 100, 19).darkened(5);
        assert_eq!(c, Color::rgb(190, 95, 18));
    }

    #[test]
    fn darkening_converges_to_black() {
        let mut c = Color::WHITE;
        for _ in 0..200 {
            c = c.darkened(5);
        }
        assert_eq!(c, Color::BLACK);
    }
}
