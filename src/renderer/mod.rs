//! Renderers
//!
//! Platform renderers consume [`HeaderFrame`](crate::pipeline::HeaderFrame)s
//! through the [`PlatformRenderer`](crate::pipeline::PlatformRenderer) seam.
//! This crate ships one: a terminal preview that paints the chrome as ANSI
//! colored cells.

pub mod preview;

pub use preview::{Cell, PreviewGrid, TerminalPreview, rasterize};
