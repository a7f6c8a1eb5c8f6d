//! Header Layout
//!
//! Resolves the geometry a header needs before it can animate:
//!
//! 1. Measures the title under the large and compact styles
//!    ([`text_measure`], behind the [`TextMeasurer`] seam)
//! 2. Lays out the compact bar row (back button slot + title slot) with
//!    [Taffy](https://github.com/DioxusLabs/taffy) flexbox
//! 3. Memoizes both in [`TitleMetricsResolver`] until the inputs change
//!
//! Everything here is computed in the left-to-right frame. Mirroring for RTL
//! happens later, in the controller and chrome renderer.

mod metrics;
mod taffy_bridge;
mod text_measure;

pub use metrics::{HeaderMetrics, TitleLayout, TitleMetricsResolver};
pub use taffy_bridge::{BarLayout, compute_bar_layout};
pub use text_measure::*;

/// Height of the compact navigation bar.
pub const BAR_HEIGHT: f32 = 44.0;

/// Horizontal padding inside the compact bar.
pub const BAR_INSET: f32 = 8.0;

/// Leading/trailing margin of the large title.
pub const LARGE_TITLE_INSET: f32 = 16.0;

/// Space below the large title before content starts.
pub const LARGE_TITLE_BOTTOM_PADDING: f32 = 8.0;

/// Width of the back chevron glyph.
pub const BACK_CHEVRON_WIDTH: f32 = 13.0;

/// Gap between the chevron and the back label.
pub const BACK_LABEL_GAP: f32 = 6.0;
