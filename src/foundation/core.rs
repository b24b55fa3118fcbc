use crate::foundation::error::{ReelmarkError, ReelmarkResult};

pub use kurbo::{BezPath, Point, Rect};

/// Fixed logical resolution of the drawing surface.
///
/// Every captured point lives in this space regardless of how large the surface is
/// displayed on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Canvas {
    /// Reject zero-sized canvases.
    pub fn validate(self) -> ReelmarkResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelmarkError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> ReelmarkResult<Self> {
        let Some(hex) = s.strip_prefix('#') else {
            return Err(ReelmarkError::validation(format!(
                "invalid color '{s}': must start with '#'"
            )));
        };
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ReelmarkError::validation(format!(
                "invalid color '{s}': must be #RRGGBB or #RRGGBBAA"
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ReelmarkError::validation(format!(
                "invalid color '{s}': must contain only hex digits after '#'"
            )));
        }

        let channel = |i: usize| -> ReelmarkResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| ReelmarkError::validation(format!("invalid color '{s}': {e}")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Hex representation; alpha is omitted when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ReelmarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

/// Clamp a time in seconds into `[0, duration]`.
///
/// Non-finite input collapses to 0; an unknown (zero) duration pins every time to 0.
pub fn clamp_time(t: f64, duration: f64) -> f64 {
    let duration = if duration.is_finite() {
        duration.max(0.0)
    } else {
        0.0
    };
    if !t.is_finite() {
        return 0.0;
    }
    t.clamp(0.0, duration)
}

/// `t / duration` in `[0, 1]`, or 0 when the duration is unknown.
pub fn time_ratio(t: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !t.is_finite() {
        return 0.0;
    }
    (t / duration).clamp(0.0, 1.0)
}

/// Render a time as `MM:SS`, or `H:MM:SS` past one hour.
///
/// Non-finite or negative times render as `00:00`.
pub fn format_timecode(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
