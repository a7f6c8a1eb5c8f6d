//! Frame composition.
//!
//! A [`HeaderFrame`] is the complete output of one pipeline run: the
//! progress it was computed for, the controller's visual state and the
//! positioned chrome, tagged with the input versions that produced it.

use crate::chrome::{ChromeLayout, render_chrome};
use crate::config::HeaderConfig;
use crate::controller::{VisualState, compute_visual_state};
use crate::direction::DirectionPolicy;
use crate::layout::HeaderMetrics;
use crate::scroll::CollapseProgress;

use super::invalidation::Invalidation;

/// Everything a platform renderer needs to draw the header once.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFrame {
    /// Bumped every time a new configuration is swapped in.
    pub config_version: u64,
    /// Bumped every time collapse progress moves.
    pub progress_version: u64,
    pub progress: CollapseProgress,
    pub visual: VisualState,
    pub chrome: ChromeLayout,
    /// Inputs that changed since the previous frame.
    pub invalidated: Invalidation,
}

/// Inputs of one frame. Borrowed from the mounted header's current snapshot.
pub(crate) struct FrameInputs<'a> {
    pub config: &'a HeaderConfig,
    pub metrics: &'a HeaderMetrics,
    pub policy: &'a DirectionPolicy,
    pub config_version: u64,
    pub progress_version: u64,
}

/// Run the controller and chrome renderer for `progress`.
pub(crate) fn compose_frame(
    inputs: &FrameInputs<'_>,
    progress: CollapseProgress,
    invalidated: Invalidation,
) -> HeaderFrame {
    let visual = compute_visual_state(progress, inputs.config, inputs.metrics, inputs.policy);
    let chrome = render_chrome(&visual, inputs.config, inputs.metrics, inputs.policy);

    HeaderFrame {
        config_version: inputs.config_version,
        progress_version: inputs.progress_version,
        progress,
        visual,
        chrome,
        invalidated,
    }
}
