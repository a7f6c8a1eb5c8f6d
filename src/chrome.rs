//! Header chrome.
//!
//! Turns a [`VisualState`] into concrete, positioned elements a platform
//! renderer can draw without any further layout: the background box, both
//! titles and the back button. Everything is in physical coordinates, so RTL
//! mirroring has already happened by the time a renderer sees it.

use crate::config::HeaderConfig;
use crate::controller::VisualState;
use crate::direction::{Direction, DirectionPolicy};
use crate::layout::{BAR_HEIGHT, HeaderMetrics, LARGE_TITLE_BOTTOM_PADDING, TitleLayout};
use crate::types::{Frame, Rgba, TextAlign};

/// One positioned piece of header chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeElement {
    pub frame: Frame,
    pub opacity: f32,
    pub color: Rgba,
    /// Text lines, empty for non-text elements.
    pub lines: Vec<String>,
    /// Scale applied around the element's alignment edge. 1.0 = unscaled.
    pub scale: f32,
    /// Directional glyph drawn flipped.
    pub mirrored_glyph: bool,
}

impl ChromeElement {
    fn boxed(frame: Frame, color: Rgba) -> Self {
        Self {
            frame,
            opacity: 1.0,
            color,
            lines: Vec::new(),
            scale: 1.0,
            mirrored_glyph: false,
        }
    }

    fn text(frame: Frame, layout: &TitleLayout, color: Rgba, opacity: f32) -> Self {
        Self {
            frame,
            opacity,
            color,
            lines: layout.lines.clone(),
            scale: 1.0,
            mirrored_glyph: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.frame.width > 0.0 && self.frame.height > 0.0
    }
}

/// Full header chrome for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    pub direction: Direction,
    pub background: ChromeElement,
    pub large_title: ChromeElement,
    /// Present while the compact title has any opacity.
    pub compact_title: Option<ChromeElement>,
    pub back_button: Option<ChromeElement>,
}

impl ChromeLayout {
    /// Current header height, bar plus what is left of the large title region.
    pub fn height(&self) -> f32 {
        self.background.frame.height
    }

    /// Elements in paint order, background first.
    pub fn elements(&self) -> impl Iterator<Item = &ChromeElement> {
        std::iter::once(&self.background)
            .chain(std::iter::once(&self.large_title))
            .chain(self.compact_title.as_ref())
            .chain(self.back_button.as_ref())
    }
}

/// Position every chrome element for `visual`.
pub fn render_chrome(
    visual: &VisualState,
    config: &HeaderConfig,
    metrics: &HeaderMetrics,
    policy: &DirectionPolicy,
) -> ChromeLayout {
    let width = config.header_width;
    let expanded = &metrics.expanded;
    let collapsed = &metrics.collapsed;

    let large_region = if config.large_title {
        expanded.height + LARGE_TITLE_BOTTOM_PADDING
    } else {
        0.0
    };
    let background = ChromeElement::boxed(
        Frame::new(0.0, 0.0, width, BAR_HEIGHT + large_region * visual.large_title_opacity),
        config.header_background_color,
    );

    let large_frame = if config.large_title {
        let x = match policy.mirror_align(config.large_title_align) {
            TextAlign::Left => visual.horizontal_anchor,
            TextAlign::Center => visual.horizontal_anchor - expanded.width / 2.0,
            TextAlign::Right => visual.horizontal_anchor - expanded.width,
        };
        Frame::new(x, BAR_HEIGHT + visual.large_title_translate_y, expanded.width, expanded.height)
    } else {
        // Without a large region the title lives in the bar
        let center = policy.mirror_frame(metrics.bar.title_slot).center_x();
        Frame::new(
            center - expanded.width / 2.0,
            (BAR_HEIGHT - expanded.height) / 2.0,
            expanded.width,
            expanded.height,
        )
    };
    let mut large_title = ChromeElement::text(
        large_frame,
        expanded,
        config.large_title_color(),
        visual.large_title_opacity,
    );
    large_title.scale = visual.large_title_scale;

    let compact_title = visual.compact_title_anchor.map(|anchor| {
        let frame = Frame::new(
            anchor - collapsed.width / 2.0,
            (BAR_HEIGHT - collapsed.height) / 2.0,
            collapsed.width,
            collapsed.height,
        );
        ChromeElement::text(
            frame,
            collapsed,
            config.compact_title_color(),
            visual.compact_title_opacity,
        )
    });

    let back_button = metrics.bar.back_button.map(|slot| {
        let mut back = ChromeElement::boxed(policy.mirror_frame(slot), config.tint_color);
        if let Some(label) = &metrics.back_label {
            back.lines = label.lines.clone();
        }
        back.mirrored_glyph = policy.mirror_icon();
        back
    });

    ChromeLayout {
        direction: policy.direction(),
        background,
        large_title,
        compact_title,
        back_button,
    }
}
