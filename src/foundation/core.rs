use image::Rgba;

use crate::foundation::error::{FramecraftError, FramecraftResult};

/// Smallest frame delay the animated output format can represent reliably, in milliseconds.
///
/// Every timeline-aware transform quantizes durations to whole multiples of this unit.
pub const MIN_UNIT_MS: u32 = 20;

/// Fully transparent RGBA8.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A 24-bit `0xRRGGBB` color. Values with any bit above the low 24 are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Rgb24(u32);

impl Rgb24 {
    pub const WHITE: Self = Self(0xFF_FF_FF);
    pub const BLACK: Self = Self(0);

    pub fn new(rgb: u32) -> FramecraftResult<Self> {
        if rgb > 0xFF_FF_FF {
            return Err(FramecraftError::invalid_argument(format!(
                "color {rgb:#x} must be a 24-bit rgb value"
            )));
        }
        Ok(Self(rgb))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Opaque RGBA8 pixel for this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        let [_, r, g, b] = self.0.to_be_bytes();
        Rgba([r, g, b, 255])
    }

    /// Parse `#rrggbb`, `0xrrggbb` or a decimal integer.
    pub fn parse(s: &str) -> FramecraftResult<Self> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix('#').or_else(|| s.strip_prefix("0x")) {
            u32::from_str_radix(hex, 16)
        } else {
            s.parse::<u32>()
        };
        let rgb = parsed
            .map_err(|_| FramecraftError::invalid_argument(format!("'{s}' is not a color")))?;
        Self::new(rgb)
    }
}

impl TryFrom<u32> for Rgb24 {
    type Error = FramecraftError;

    fn try_from(value: u32) -> FramecraftResult<Self> {
        Self::new(value)
    }
}

impl From<Rgb24> for u32 {
    fn from(value: Rgb24) -> Self {
        value.0
    }
}

impl std::str::FromStr for Rgb24 {
    type Err = FramecraftError;

    fn from_str(s: &str) -> FramecraftResult<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
