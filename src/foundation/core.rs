use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Vec2};

/// Viewports narrower than this use the compact (mobile) layouts.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// A point on the session's virtual clock, in milliseconds since page load.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct TimeMs(pub u64);

impl TimeMs {
    pub const ZERO: Self = Self(0);

    pub fn after(self, d: DurationMs) -> Self {
        Self(self.0.saturating_add(d.0))
    }

    /// Elapsed time since `earlier`, saturating at zero.
    pub fn since(self, earlier: TimeMs) -> DurationMs {
        DurationMs(self.0.saturating_sub(earlier.0))
    }
}

/// A span on the virtual clock, in milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct DurationMs(pub u64);

impl DurationMs {
    pub const ZERO: Self = Self(0);

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Truncating conversion from fractional seconds; negative input maps to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * 1000.0).max(0.0) as u64)
    }

    pub fn saturating_add(self, other: DurationMs) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: DurationMs) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(MotionError::validation(
                "Viewport width and height must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn is_mobile(self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> MotionResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| MotionError::validation(format!("color \"{s}\" must start with '#'")))?;
        if !hex.is_ascii() {
            return Err(MotionError::validation(format!("invalid hex color \"{s}\"")));
        }
        let digit = |i: usize| -> MotionResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| MotionError::validation(format!("invalid hex color \"{s}\"")))
        };
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c
                        .to_digit(16)
                        .ok_or_else(|| MotionError::validation(format!("invalid hex color \"{s}\"")))?;
                    *slot = (v * 17) as u8;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(digit(0)?, digit(2)?, digit(4)?)),
            8 => Ok(Self {
                r: digit(0)?,
                g: digit(2)?,
                b: digit(4)?,
                a: digit(6)?,
            }),
            _ => Err(MotionError::validation(format!(
                "hex color \"{s}\" must have 3, 6 or 8 digits"
            ))),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba8 {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
