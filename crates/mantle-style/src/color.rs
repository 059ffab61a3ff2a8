#![forbid(unsafe_code)]

//! Packed RGBA colors and hex parsing.

use std::fmt;
use std::str::FromStr;

/// A color packed into a single `u32` as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(u32);

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The string did not start with `#`.
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    /// The digit count was not 3, 6, or 8.
    #[error("color must have 3, 6, or 8 hex digits: {0:?}")]
    InvalidLength(String),
    /// A character was not a hex digit.
    #[error("invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Raw packed value.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Scale the alpha channel by `opacity`, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let a = (f32::from(self.a()) * opacity).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_owned()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(input.to_owned()));
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        let parsed = match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .map(|d| (d * 17) as u8);
                match (channels.next(), channels.next(), channels.next()) {
                    (Some(r), Some(g), Some(b)) => Some(Self::rgb(r, g, b)),
                    _ => None,
                }
            }
            6 => match (byte(&digits[0..2]), byte(&digits[2..4]), byte(&digits[4..6])) {
                (Some(r), Some(g), Some(b)) => Some(Self::rgb(r, g, b)),
                _ => None,
            },
            8 => match (
                byte(&digits[0..2]),
                byte(&digits[2..4]),
                byte(&digits[4..6]),
                byte(&digits[6..8]),
            ) {
                (Some(r), Some(g), Some(b), Some(a)) => Some(Self::rgba(r, g, b, a)),
                _ => None,
            },
            _ => return Err(ColorParseError::InvalidLength(input.to_owned())),
        };
        parsed.ok_or_else(|| ColorParseError::InvalidDigit(input.to_owned()))
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
