//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error raised when a hex colour string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex colour: {input}")]
pub struct ParseColourError {
    pub input: String,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB`, `#RRGGBB`, and `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColourError> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let invalid = || ParseColourError {
            input: s.to_string(),
        };

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    digits[i] = c.to_digit(16).ok_or_else(invalid)? as u8;
                }
                Ok(Self::rgb(
                    digits[0] << 4 | digits[0],
                    digits[1] << 4 | digits[1],
                    digits[2] << 4 | digits[2],
                ))
            }
            6 | 8 => {
                let mut bytes = [0u8; 4];
                bytes[3] = 255;
                for i in 0..hex.len() / 2 {
                    bytes[i] =
                        u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
                }
                Ok(Self::from_rgba(bytes))
            }
            _ => Err(invalid()),
        }
    }

    /// Convert to an RGBA byte array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a colour from an RGBA byte array.
    pub const fn from_rgba(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Keep the RGB channels, replacing alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// BT.601 luminance of the RGB channels, in [0, 255].
    pub fn luminance(self) -> f32 {
        crate::types::space::luminance(self.r, self.g, self.b)
    }

    /// Squared Euclidean distance between the RGB channels of two colours.
    ///
    /// Alpha is ignored; the quantizer only compares opaque palette entries.
    pub fn distance_sq(self, other: Colour) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, ParseColourError> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Colour::from_hex(&s).map_err(de::Error::custom)
    }
}
