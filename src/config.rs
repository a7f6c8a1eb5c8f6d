//! Header configuration.
//!
//! [`HeaderConfig`] is the validated, typed configuration a host passes when
//! it mounts a header and every time title, style or direction change.
//!
//! Hosts that describe headers declaratively can start from [`HeaderOptions`]
//! instead: a serde option bag shaped like navigator `screenOptions` and
//! per-screen `options`. Screen options are authoritative; navigator options
//! only fill fields the screen leaves unset. Values are never merged inside a
//! field, so a screen-level `headerLargeTitleStyle` replaces the navigator's
//! whole style object.
//!
//! ```
//! use spark_header::{Direction, HeaderOptions};
//!
//! let navigator = HeaderOptions::from_json(
//!     r##"{ "direction": "rtl", "headerTintColor": "#007AFF" }"##,
//! )
//! .unwrap();
//! let screen =
//!     HeaderOptions::from_json(r#"{ "title": "عنوان", "headerLargeTitle": true }"#).unwrap();
//!
//! let config = screen
//!     .inherit(&navigator)
//!     .into_config(390.0, Direction::Ltr)
//!     .unwrap();
//! assert_eq!(config.direction, Direction::Rtl);
//! ```

use serde::Deserialize;

use crate::direction::{Direction, DirectionPolicy};
use crate::error::{ConfigError, HeaderError, LayoutError};
use crate::layout::OverflowPolicy;
use crate::scroll::DEFAULT_COLLAPSE_DISTANCE;
use crate::types::{FontWeight, Rgba, TextAlign, TitleStyle};

// =============================================================================
// HeaderConfig
// =============================================================================

/// Back button shown at the leading edge of the compact bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackButton {
    /// Text next to the chevron. Chevron only when `None`.
    pub label: Option<String>,
}

impl BackButton {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()) }
    }
}

/// Typed header configuration. Read-only to the header subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderConfig {
    pub direction: Direction,
    pub title_text: String,
    pub large_style: TitleStyle,
    pub compact_style: TitleStyle,
    pub header_background_color: Rgba,
    pub tint_color: Rgba,
    pub header_width: f32,
    /// Scroll distance over which the large title fully collapses.
    pub collapse_distance: f32,
    /// Large-title feature switch. When off the header only cross-fades.
    pub large_title: bool,
    pub large_title_align: TextAlign,
    pub large_title_overflow: OverflowPolicy,
    pub back_button: Option<BackButton>,
}

impl HeaderConfig {
    /// Platform defaults: LTR, 34pt/17pt titles, system blue tint, light
    /// chrome, chevron-only back button.
    pub fn new(title: impl Into<String>, header_width: f32) -> Self {
        Self {
            direction: Direction::Ltr,
            title_text: title.into(),
            large_style: TitleStyle::large(),
            compact_style: TitleStyle::compact(),
            header_background_color: Rgba::CHROME_LIGHT,
            tint_color: Rgba::SYSTEM_BLUE,
            header_width,
            collapse_distance: DEFAULT_COLLAPSE_DISTANCE,
            large_title: true,
            large_title_align: TextAlign::Left,
            large_title_overflow: OverflowPolicy::Truncate,
            back_button: Some(BackButton::default()),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_text = title.into();
        self
    }

    pub fn with_width(mut self, header_width: f32) -> Self {
        self.header_width = header_width;
        self
    }

    pub fn with_collapse_distance(mut self, distance: f32) -> Self {
        self.collapse_distance = distance;
        self
    }

    pub fn with_large_title(mut self, enabled: bool) -> Self {
        self.large_title = enabled;
        self
    }

    pub fn with_large_style(mut self, style: TitleStyle) -> Self {
        self.large_style = style;
        self
    }

    pub fn with_compact_style(mut self, style: TitleStyle) -> Self {
        self.compact_style = style;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.large_title_align = align;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.large_title_overflow = overflow;
        self
    }

    pub fn with_tint_color(mut self, color: Rgba) -> Self {
        self.tint_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.header_background_color = color;
        self
    }

    pub fn with_back_button(mut self, back_button: Option<BackButton>) -> Self {
        self.back_button = back_button;
        self
    }

    /// Check everything that can be checked without measuring text.
    ///
    /// Configuration problems are reported before layout problems.
    pub fn validate(&self) -> Result<(), HeaderError> {
        let distance = self.collapse_distance;
        if !(distance.is_finite() && distance > 0.0) {
            return Err(ConfigError::NonPositiveCollapseDistance { distance }.into());
        }
        self.large_style.validate("large title")?;
        self.compact_style.validate("compact title")?;

        let width = self.header_width;
        if !(width.is_finite() && width > 0.0) {
            return Err(LayoutError::NonPositiveWidth { width }.into());
        }
        Ok(())
    }

    pub fn policy(&self) -> DirectionPolicy {
        DirectionPolicy::new(self.direction, self.header_width)
    }

    /// Large title color: its own style color, else the tint.
    pub fn large_title_color(&self) -> Rgba {
        self.large_style.color.unwrap_or(self.tint_color)
    }

    /// Compact title color: its own style color, else the tint.
    pub fn compact_title_color(&self) -> Rgba {
        self.compact_style.color.unwrap_or(self.tint_color)
    }
}

// =============================================================================
// HeaderOptions
// =============================================================================

/// Font weight as written in options: `"bold"`, `"600"` or `600`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WeightOption {
    Number(u16),
    Name(String),
}

impl WeightOption {
    fn parse(&self) -> Result<FontWeight, ConfigError> {
        match self {
            Self::Number(n) => FontWeight::new(*n),
            Self::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleStyleOptions {
    pub font_size: Option<f32>,
    pub font_weight: Option<WeightOption>,
    pub color: Option<String>,
    pub font_family: Option<String>,
}

impl TitleStyleOptions {
    fn apply(&self, mut base: TitleStyle, field: &'static str) -> Result<TitleStyle, ConfigError> {
        if let Some(size) = self.font_size {
            base.font_size = size;
        }
        if let Some(weight) = &self.font_weight {
            base.font_weight = weight.parse()?;
        }
        if let Some(color) = &self.color {
            base.color = Some(parse_color(field, color)?);
        }
        if let Some(family) = &self.font_family {
            base.font_family = Some(family.clone());
        }
        base.validate(field)?;
        Ok(base)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyleOptions {
    pub background_color: Option<String>,
}

/// Declarative header options, one bag per navigator or screen.
///
/// Unknown keys are ignored so a host can pass its full options object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderOptions {
    pub title: Option<String>,
    pub direction: Option<String>,
    pub header_large_title: Option<bool>,
    pub header_large_title_style: Option<TitleStyleOptions>,
    pub header_title_style: Option<TitleStyleOptions>,
    /// Alignment of the large title only. The compact bar title is always
    /// centered.
    pub header_large_title_align: Option<String>,
    pub header_style: Option<HeaderStyleOptions>,
    pub header_tint_color: Option<String>,
    pub header_back_visible: Option<bool>,
    pub header_back_title: Option<String>,
    pub header_large_title_max_lines: Option<u16>,
    pub collapse_distance: Option<f32>,
}

impl HeaderOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill every unset field from `defaults` (usually navigator options).
    pub fn inherit(self, defaults: &HeaderOptions) -> HeaderOptions {
        let d = defaults.clone();
        HeaderOptions {
            title: self.title.or(d.title),
            direction: self.direction.or(d.direction),
            header_large_title: self.header_large_title.or(d.header_large_title),
            header_large_title_style: self
                .header_large_title_style
                .or(d.header_large_title_style),
            header_title_style: self.header_title_style.or(d.header_title_style),
            header_large_title_align: self
                .header_large_title_align
                .or(d.header_large_title_align),
            header_style: self.header_style.or(d.header_style),
            header_tint_color: self.header_tint_color.or(d.header_tint_color),
            header_back_visible: self.header_back_visible.or(d.header_back_visible),
            header_back_title: self.header_back_title.or(d.header_back_title),
            header_large_title_max_lines: self
                .header_large_title_max_lines
                .or(d.header_large_title_max_lines),
            collapse_distance: self.collapse_distance.or(d.collapse_distance),
        }
    }

    /// Validate into a [`HeaderConfig`].
    ///
    /// `default_direction` applies only when no direction is set, typically
    /// [`Direction::from_locale`]. Header width is checked at mount.
    pub fn into_config(
        self,
        header_width: f32,
        default_direction: Direction,
    ) -> Result<HeaderConfig, ConfigError> {
        let title = self.title.ok_or(ConfigError::MissingTitle)?;

        let configured = self.direction.as_deref().map(str::parse).transpose()?;
        let direction = DirectionPolicy::resolve(configured, default_direction);

        let mut config = HeaderConfig::new(title, header_width).with_direction(direction);

        if let Some(enabled) = self.header_large_title {
            config.large_title = enabled;
        }
        if let Some(style) = &self.header_large_title_style {
            config.large_style = style.apply(TitleStyle::large(), "headerLargeTitleStyle")?;
        }
        if let Some(style) = &self.header_title_style {
            config.compact_style = style.apply(TitleStyle::compact(), "headerTitleStyle")?;
        }
        if let Some(align) = &self.header_large_title_align {
            config.large_title_align = align.parse()?;
        }
        if let Some(color) = self.header_style.as_ref().and_then(|s| s.background_color.as_ref()) {
            config.header_background_color = parse_color("headerStyle.backgroundColor", color)?;
        }
        if let Some(color) = &self.header_tint_color {
            config.tint_color = parse_color("headerTintColor", color)?;
        }
        if let Some(max_lines) = self.header_large_title_max_lines {
            if max_lines > 1 {
                config.large_title_overflow = OverflowPolicy::Wrap { max_lines };
            }
        }
        if self.header_back_visible == Some(false) {
            config.back_button = None;
        } else if let Some(label) = self.header_back_title {
            config.back_button = Some(BackButton::labelled(label));
        }
        if let Some(distance) = self.collapse_distance {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(ConfigError::NonPositiveCollapseDistance { distance });
            }
            config.collapse_distance = distance;
        }

        Ok(config)
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Rgba, ConfigError> {
    Rgba::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}
