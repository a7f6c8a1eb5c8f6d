//! Header collapse controller.
//!
//! Maps a [`CollapseProgress`] to the [`VisualState`] of the header: how
//! visible each title is, how far the large title has slid up and where the
//! titles are anchored horizontally.
//!
//! [`compute_visual_state`] is a pure function. The same inputs always give
//! the same state, and there is no memory of previous progress values.

use crate::config::HeaderConfig;
use crate::direction::DirectionPolicy;
use crate::layout::{HeaderMetrics, LARGE_TITLE_INSET};
use crate::scroll::{CollapsePhase, CollapseProgress};
use crate::types::{Axis, TextAlign};

/// Per-frame presentation of the header titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub phase: CollapsePhase,
    pub large_title_opacity: f32,
    pub compact_title_opacity: f32,
    /// Vertical shift of the large title, zero or negative.
    pub large_title_translate_y: f32,
    /// Size of the large title relative to its expanded size.
    pub large_title_scale: f32,
    /// Physical x the large title aligns to.
    pub horizontal_anchor: f32,
    /// Physical x of the compact title's center. `None` while it is invisible.
    pub compact_title_anchor: Option<f32>,
}

/// Anchor of the large title in the LTR frame.
fn ltr_anchor(align: TextAlign, width: f32) -> f32 {
    match align {
        TextAlign::Left => LARGE_TITLE_INSET,
        TextAlign::Center => width / 2.0,
        TextAlign::Right => width - LARGE_TITLE_INSET,
    }
}

pub fn compute_visual_state(
    progress: CollapseProgress,
    config: &HeaderConfig,
    metrics: &HeaderMetrics,
    policy: &DirectionPolicy,
) -> VisualState {
    let p = progress.value();

    let large_title_opacity = 1.0 - p;
    let compact_title_opacity = p;

    let expanded_height = metrics.expanded.height;
    let collapsed_height = metrics.collapsed.height;

    // Equal heights: pure cross-fade
    let (large_title_translate_y, large_title_scale) =
        if expanded_height == collapsed_height || expanded_height <= 0.0 {
            (0.0, 1.0)
        } else {
            let delta = expanded_height - collapsed_height;
            (-(delta * p), 1.0 + (collapsed_height / expanded_height - 1.0) * p)
        };

    let horizontal_anchor = policy.mirror(
        ltr_anchor(config.large_title_align, config.header_width),
        Axis::Horizontal,
    );

    let compact_title_anchor = (compact_title_opacity > 0.0)
        .then(|| policy.mirror(metrics.bar.title_slot.center_x(), Axis::Horizontal));

    VisualState {
        phase: progress.phase(),
        large_title_opacity,
        compact_title_opacity,
        large_title_translate_y,
        large_title_scale,
        horizontal_anchor,
        compact_title_anchor,
    }
}
