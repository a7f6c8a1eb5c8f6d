//! Core types for spark-header.
//!
//! Geometry, color and text style values shared by every stage of the header
//! pipeline. All coordinates are in logical points with the origin at the
//! top-left corner of the header.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// The platform's default accent (`#007AFF`).
    pub const SYSTEM_BLUE: Self = Self::rgb(0, 122, 255);

    /// Light header chrome background (`#F8F9FA`).
    pub const CHROME_LIGHT: Self = Self::rgb(248, 249, 250);

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        let mix = |x: u8, y: u8| ((x as f32 * inv_t) + (y as f32 * t)).round() as u8;

        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use spark_header::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#007AFF"), Some(Rgba::SYSTEM_BLUE));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert!(Rgba::from_hex("blue").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Which coordinate axis a value lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A position in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Edge insets in physical (left/right) terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same inset on the left and right, none vertically.
    pub const fn horizontal(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }
}

/// Horizontal text alignment, expressed in the left-to-right frame.
///
/// Under RTL the alignment is mirrored: `Left` lands on the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for TextAlign {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(ConfigError::InvalidAlignment { value: s.to_string() }),
        }
    }
}

// =============================================================================
// Text style
// =============================================================================

/// CSS-style numeric font weight (100-900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(u16);

impl FontWeight {
    pub const REGULAR: Self = Self(400);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);

    /// Create a weight, rejecting values outside 100..=900 or not a multiple of 100.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if (100..=900).contains(&value) && value % 100 == 0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidFontWeight { value: value.to_string() })
        }
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Semibold and heavier.
    pub const fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl FromStr for FontWeight {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "regular" => Ok(Self::REGULAR),
            "bold" => Ok(Self::BOLD),
            other => other
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidFontWeight { value: s.to_string() })
                .and_then(Self::new),
        }
    }
}

/// Style of one title string.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// Falls back to the header tint color when unset.
    pub color: Option<Rgba>,
    pub font_family: Option<String>,
}

impl TitleStyle {
    /// 34pt bold, the platform's large-title default.
    pub fn large() -> Self {
        Self {
            font_size: 34.0,
            font_weight: FontWeight::BOLD,
            color: None,
            font_family: None,
        }
    }

    /// 17pt semibold, the compact bar default.
    pub fn compact() -> Self {
        Self {
            font_size: 17.0,
            font_weight: FontWeight::SEMIBOLD,
            color: None,
            font_family: None,
        }
    }

    /// Font size must be finite and positive.
    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.font_size.is_finite() && self.font_size > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidFontSize { field, size: self.font_size })
        }
    }
}
