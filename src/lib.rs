//! # spark-header
//!
//! Collapsing large-title navigation header with right-to-left support.
//!
//! A header shows a large title below a compact bar. As content scrolls up
//! the large title fades out and slides under the bar while a compact title
//! fades in, centered in the bar. Under RTL the whole header is mirrored:
//! the back button sits on the right, its chevron points right, and the large
//! title hugs the right edge.
//!
//! ## Architecture
//!
//! ```text
//! scroll offset → ScrollOffsetTracker → compute_visual_state → render_chrome
//!                                             ↑                    ↑
//!                              TitleMetricsResolver (memoized)  DirectionPolicy
//!                                                                  ↓
//!                                                          PlatformRenderer
//! ```
//!
//! Geometry is resolved once per configuration in the left-to-right frame
//! and mirrored per frame. The per-frame stages are pure functions; only the
//! platform renderer performs I/O.
//!
//! ## Modules
//!
//! - [`types`] - Geometry, colors, title styles
//! - [`direction`] - Direction resolution and RTL mirroring
//! - [`scroll`] - Scroll offsets to collapse progress
//! - [`layout`] - Title measurement and compact bar layout (Taffy)
//! - [`controller`] - Progress to visual state
//! - [`chrome`] - Visual state to positioned chrome
//! - [`config`] - Typed config and declarative header options
//! - [`pipeline`] - Mount lifecycle and frame production
//! - [`renderer`] - Terminal preview renderer (crossterm)

pub mod chrome;
pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod scroll;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use chrome::{ChromeElement, ChromeLayout, render_chrome};
pub use config::{BackButton, HeaderConfig, HeaderOptions};
pub use controller::{VisualState, compute_visual_state};
pub use direction::{Direction, DirectionPolicy};
pub use error::{ConfigError, HeaderError, LayoutError};
pub use layout::{
    EstimatingMeasurer, HeaderMetrics, OverflowPolicy, TextMeasurer, TitleLayout,
    TitleMetricsResolver,
};
pub use pipeline::{
    HeaderFrame, HeaderHandle, Invalidation, PlatformRenderer, mount, mount_with_measurer,
};
pub use renderer::TerminalPreview;
pub use scroll::{
    CollapsePhase, CollapseProgress, DEFAULT_COLLAPSE_DISTANCE, ListenerId, ScrollOffsetTracker,
    ScrollSource, ScrollSubscription,
};
