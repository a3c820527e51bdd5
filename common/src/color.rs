//! RGB color value type used by the theme tables and the annotator.

use crate::error::{NeuroVisionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(NeuroVisionError::Config(format!("invalid hex color: {hex}")));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| NeuroVisionError::Config(format!("invalid hex color: {hex}")))
        };
        Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lighten or darken by a fixed amount, clamped per channel to 0..=255.
    pub fn adjust(self, amount: i16) -> Self {
        let shift = |channel: u8| (channel as i16 + amount).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
