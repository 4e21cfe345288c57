//! CSS-style colors.
//!
//! Shapes and configuration files describe colors as strings (`"#1e90ff"`,
//! `"rgba(255, 0, 0, 0.5)"`, `"white"`). They are parsed once into [`Color`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// Straight (non-premultiplied) RGBA color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha multiplied by `factor`.
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Alpha as an 8-bit channel.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    fn from_named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(literal: &str, hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex {
            literal: literal.to_string(),
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match hex.len() {
            3 => Ok(Color::rgb(
                nibble(0).map_err(|_| invalid())?,
                nibble(1).map_err(|_| invalid())?,
                nibble(2).map_err(|_| invalid())?,
            )),
            6 | 8 => {
                let r = byte(0).map_err(|_| invalid())?;
                let g = byte(2).map_err(|_| invalid())?;
                let b = byte(4).map_err(|_| invalid())?;
                let a = if hex.len() == 8 {
                    byte(6).map_err(|_| invalid())? as f32 / 255.0
                } else {
                    1.0
                };
                Ok(Color::rgba(r, g, b, a))
            }
            _ => Err(invalid()),
        }
    }

    fn from_function(literal: &str, args: &str, with_alpha: bool) -> Result<Self, ColorError> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorError::WrongArity {
                literal: literal.to_string(),
                expected,
                found: parts.len(),
            });
        }
        let channel = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|v| (0.0..=255.0).contains(v))
                .map(|v| v.round() as u8)
                .ok_or_else(|| ColorError::InvalidComponent {
                    literal: literal.to_string(),
                    component: s.to_string(),
                })
        };
        let a = if with_alpha {
            parts[3]
                .parse::<f32>()
                .ok()
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| ColorError::InvalidComponent {
                    literal: literal.to_string(),
                    component: parts[3].to_string(),
                })?
        } else {
            1.0
        };
        Ok(Color::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        if literal.is_empty() {
            return Err(ColorError::Empty);
        }
        let lower = literal.to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix('#') {
            return Color::from_hex(literal, hex);
        }
        if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return Color::from_function(literal, args, true);
        }
        if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return Color::from_function(literal, args, false);
        }
        Color::from_named(&lower).ok_or_else(|| ColorError::Unknown {
            literal: literal.to_string(),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}
