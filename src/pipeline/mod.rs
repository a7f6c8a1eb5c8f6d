//! Header Pipeline
//!
//! Connects the host's scroll stream to the platform renderer.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ScrollSource → ScrollOffsetTracker → compute_visual_state → render_chrome
//!                                                                  ↓
//!                                                          PlatformRenderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **mount** - validates the config, resolves metrics, renders the initial frame
//! 2. **scroll tick** - tracker derives progress; a frame is produced only if it moved
//! 3. **config update** - validated and resolved off to the side, then swapped in
//!
//! ## Key Design Principles
//!
//! - **Pure stages**: the controller and chrome renderer are pure functions
//! - **Side effects at the edge**: only [`PlatformRenderer::present`] does I/O
//! - **Versioned inputs**: config and progress are versioned independently on each frame

pub mod frame;
pub mod invalidation;
pub mod mount;

pub use frame::HeaderFrame;
pub use invalidation::Invalidation;
pub use mount::{HeaderHandle, PlatformRenderer, mount, mount_with_measurer};
