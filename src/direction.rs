//! Layout direction and the coordinate mapping that follows from it.
//!
//! A header is laid out once in the left-to-right frame. Under RTL every
//! horizontal coordinate is then reflected about the header's vertical center
//! line, so `x` becomes `width - x`. Vertical coordinates never change.
//!
//! # Resolution order
//!
//! 1. Direction set on the header's own configuration
//! 2. Direction set on the enclosing navigator (default only, see `config`)
//! 3. Direction inferred from the locale
//!
//! ```
//! use spark_header::{Direction, DirectionPolicy};
//!
//! let inferred = Direction::from_locale("he-IL");
//! assert_eq!(DirectionPolicy::resolve(None, inferred), Direction::Rtl);
//! assert_eq!(DirectionPolicy::resolve(Some(Direction::Ltr), inferred), Direction::Ltr);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{Axis, Frame, Insets, Point, TextAlign};

/// Language subtags written right-to-left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "ps", "sd", "ug", "ur", "yi",
];

// =============================================================================
// Direction
// =============================================================================

/// The direction of the layout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Infer the direction from a BCP 47 locale tag (`ar-EG`, `he_IL`, `en`).
    ///
    /// Only the primary language subtag is consulted.
    pub fn from_locale(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if RTL_LANGUAGES.contains(&language.as_str()) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(ConfigError::UnknownDirection { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        })
    }
}

// =============================================================================
// DirectionPolicy
// =============================================================================

/// Direction of one header instance plus the width its mirror is taken over.
///
/// Immutable: a header whose direction changes gets a new policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionPolicy {
    direction: Direction,
    width: f32,
}

impl DirectionPolicy {
    pub fn new(direction: Direction, width: f32) -> Self {
        Self { direction, width }
    }

    /// An explicitly configured direction always wins over the default.
    pub fn resolve(configured: Option<Direction>, default: Direction) -> Direction {
        configured.unwrap_or(default)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Map a coordinate from the LTR frame into this header's frame.
    ///
    /// Identity for LTR and for the vertical axis.
    #[inline]
    pub fn mirror(&self, value: f32, axis: Axis) -> f32 {
        match (self.direction, axis) {
            (Direction::Rtl, Axis::Horizontal) => self.width - value,
            _ => value,
        }
    }

    pub fn mirror_point(&self, point: Point) -> Point {
        Point::new(self.mirror(point.x, Axis::Horizontal), point.y)
    }

    /// Reflect a rectangle laid out in the LTR frame.
    pub fn mirror_frame(&self, frame: Frame) -> Frame {
        match self.direction {
            Direction::Ltr => frame,
            Direction::Rtl => Frame {
                x: self.width - frame.right(),
                ..frame
            },
        }
    }

    pub fn mirror_align(&self, align: TextAlign) -> TextAlign {
        match (self.direction, align) {
            (Direction::Rtl, TextAlign::Left) => TextAlign::Right,
            (Direction::Rtl, TextAlign::Right) => TextAlign::Left,
            (_, align) => align,
        }
    }

    pub fn mirror_insets(&self, insets: Insets) -> Insets {
        match self.direction {
            Direction::Ltr => insets,
            Direction::Rtl => Insets {
                left: insets.right,
                right: insets.left,
                ..insets
            },
        }
    }

    /// Directional glyphs (back chevron, disclosure arrows) flip under RTL.
    pub fn mirror_icon(&self) -> bool {
        self.direction.is_rtl()
    }

    /// Physical x of the leading edge: left for LTR, right for RTL.
    pub fn leading_edge(&self) -> f32 {
        self.mirror(0.0, Axis::Horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("rtl".parse::<Direction>().unwrap(), Direction::Rtl);
        assert_eq!(" LTR ".parse::<Direction>().unwrap(), Direction::Ltr);
        assert_eq!(
            "auto".parse::<Direction>().unwrap_err(),
            ConfigError::UnknownDirection { value: "auto".into() }
        );
    }

    #[test]
    fn test_deserialize_direction() {
        let dir: Direction = serde_json::from_str("\"rtl\"").unwrap();
        assert_eq!(dir, Direction::Rtl);
        assert!(serde_json::from_str::<Direction>("\"sideways\"").is_err());
    }

    #[test]
    fn test_from_locale() {
        assert_eq!(Direction::from_locale("ar-EG"), Direction::Rtl);
        assert_eq!(Direction::from_locale("he_IL"), Direction::Rtl);
        assert_eq!(Direction::from_locale("FA"), Direction::Rtl);
        assert_eq!(Direction::from_locale("en-US"), Direction::Ltr);
        assert_eq!(Direction::from_locale(""), Direction::Ltr);
    }

    #[test]
    fn test_resolve_prefers_configured() {
        assert_eq!(DirectionPolicy::resolve(Some(Direction::Rtl), Direction::Ltr), Direction::Rtl);
        assert_eq!(DirectionPolicy::resolve(Some(Direction::Ltr), Direction::Rtl), Direction::Ltr);
        assert_eq!(DirectionPolicy::resolve(None, Direction::Rtl), Direction::Rtl);
    }

    #[test]
    fn test_mirror_ltr_is_identity() {
        let policy = DirectionPolicy::new(Direction::Ltr, 390.0);
        assert_eq!(policy.mirror(16.0, Axis::Horizontal), 16.0);
        assert_eq!(policy.mirror(16.0, Axis::Vertical), 16.0);
        let frame = Frame::new(8.0, 0.0, 30.0, 44.0);
        assert_eq!(policy.mirror_frame(frame), frame);
        assert!(!policy.mirror_icon());
        assert_eq!(policy.leading_edge(), 0.0);
    }

    #[test]
    fn test_mirror_rtl() {
        let policy = DirectionPolicy::new(Direction::Rtl, 390.0);
        assert_eq!(policy.mirror(16.0, Axis::Horizontal), 374.0);
        assert_eq!(policy.mirror(16.0, Axis::Vertical), 16.0);
        assert_eq!(
            policy.mirror_frame(Frame::new(8.0, 2.0, 30.0, 40.0)),
            Frame::new(352.0, 2.0, 30.0, 40.0)
        );
        assert_eq!(policy.mirror_align(TextAlign::Left), TextAlign::Right);
        assert_eq!(policy.mirror_align(TextAlign::Center), TextAlign::Center);
        assert_eq!(
            policy.mirror_insets(Insets::new(1.0, 2.0, 3.0, 4.0)),
            Insets::new(1.0, 4.0, 3.0, 2.0)
        );
        assert!(policy.mirror_icon());
        assert_eq!(policy.leading_edge(), 390.0);
        assert_eq!(policy.mirror_point(Point::new(195.0, 22.0)), Point::new(195.0, 22.0));
    }

    #[test]
    fn test_mirror_twice_round_trips() {
        let policy = DirectionPolicy::new(Direction::Rtl, 320.0);
        let frame = Frame::new(12.0, 0.0, 100.0, 20.0);
        assert_eq!(policy.mirror_frame(policy.mirror_frame(frame)), frame);
    }
}
