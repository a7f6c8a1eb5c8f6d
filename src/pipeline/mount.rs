//! Mount API - header lifecycle.
//!
//! Binds a [`HeaderConfig`] to the host's [`ScrollSource`] and pushes a
//! [`HeaderFrame`] to a [`PlatformRenderer`] whenever an input changes.
//!
//! # Example
//!
//! ```
//! use spark_header::{HeaderConfig, HeaderFrame, ScrollSource, mount};
//!
//! let source = ScrollSource::new();
//! let handle = mount(HeaderConfig::new("Inbox", 390.0), &source, |frame: &HeaderFrame| {
//!     let _ = frame.chrome.height();
//! })
//! .unwrap();
//!
//! source.emit(26.0);
//! assert_eq!(handle.progress().value(), 0.5);
//!
//! handle.unmount();
//! assert_eq!(source.listener_count(), 0);
//! ```
//!
//! # Snapshots
//!
//! The mounted header keeps one immutable snapshot of configuration, policy
//! and metrics. [`HeaderHandle::update_config`] validates and resolves the
//! replacement completely before swapping it in, so a frame is always
//! computed from a single snapshot. A rejected update leaves the previous
//! snapshot rendering.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::HeaderConfig;
use crate::direction::DirectionPolicy;
use crate::error::HeaderError;
use crate::layout::{EstimatingMeasurer, HeaderMetrics, TextMeasurer, TitleMetricsResolver};
use crate::scroll::{
    CollapseProgress, ListenerId, ScrollOffsetTracker, ScrollSource, ScrollSubscription,
};

use super::frame::{FrameInputs, HeaderFrame, compose_frame};
use super::invalidation::Invalidation;

// =============================================================================
// Platform Renderer
// =============================================================================

/// Receives every frame the header produces.
///
/// Called synchronously from the scroll event or config update that caused
/// the frame. Implementations must not call back into the [`HeaderHandle`].
pub trait PlatformRenderer {
    fn present(&mut self, frame: &HeaderFrame);
}

impl<F> PlatformRenderer for F
where
    F: FnMut(&HeaderFrame),
{
    fn present(&mut self, frame: &HeaderFrame) {
        self(frame)
    }
}

// =============================================================================
// Header State
// =============================================================================

struct HeaderState {
    config: HeaderConfig,
    policy: DirectionPolicy,
    resolver: TitleMetricsResolver,
    metrics: Rc<HeaderMetrics>,
    tracker: ScrollOffsetTracker,
    renderer: Box<dyn PlatformRenderer>,
    config_version: u64,
    progress_version: u64,
    frame: HeaderFrame,
}

impl HeaderState {
    fn inputs(&self) -> FrameInputs<'_> {
        FrameInputs {
            config: &self.config,
            metrics: &self.metrics,
            policy: &self.policy,
            config_version: self.config_version,
            progress_version: self.progress_version,
        }
    }

    fn render(&mut self, invalidated: Invalidation) {
        let frame = compose_frame(&self.inputs(), self.tracker.progress(), invalidated);
        self.renderer.present(&frame);
        self.frame = frame;
    }

    fn on_scroll(&mut self, offset_y: f32) {
        let before = self.tracker.progress();
        let progress = self.tracker.update(offset_y);
        if progress == before {
            return;
        }
        self.progress_version += 1;
        self.render(Invalidation::PROGRESS);
    }

    /// Validate, resolve and swap in `config`. Nothing changes on error.
    fn apply_config(&mut self, config: HeaderConfig) -> Result<Invalidation, HeaderError> {
        config.validate()?;
        if config == self.config {
            return Ok(Invalidation::empty());
        }

        let mut invalidated = Invalidation::CONFIG;
        let direction_changed = config.direction != self.config.direction;

        // A new direction gets a new header instance: fresh policy, fresh cache
        let (resolver, metrics) = if direction_changed {
            let mut resolver = TitleMetricsResolver::new(self.resolver.measurer());
            let metrics = resolver.resolve(&config)?;
            (Some(resolver), metrics)
        } else {
            (None, self.resolver.resolve(&config)?)
        };

        if config.collapse_distance != self.tracker.collapse_distance() {
            let before = self.tracker.progress();
            if self.tracker.set_collapse_distance(config.collapse_distance)? != before {
                self.progress_version += 1;
                invalidated |= Invalidation::PROGRESS;
            }
        }

        if let Some(resolver) = resolver {
            info!(
                from = %self.config.direction,
                to = %config.direction,
                "header direction changed, instance re-created"
            );
            self.resolver = resolver;
            invalidated |= Invalidation::DIRECTION;
        }
        if !Rc::ptr_eq(&metrics, &self.metrics) {
            invalidated |= Invalidation::METRICS;
        }

        self.policy = config.policy();
        self.metrics = metrics;
        self.config = config;
        self.config_version += 1;
        Ok(invalidated)
    }
}

// =============================================================================
// Header Handle
// =============================================================================

/// Handle returned by [`mount`]. Dropping it unmounts the header.
pub struct HeaderHandle {
    state: Rc<RefCell<HeaderState>>,
    subscription: Option<ScrollSubscription>,
}

impl HeaderHandle {
    /// Re-supply the configuration.
    ///
    /// On error the previous configuration keeps rendering and no frame is
    /// produced.
    pub fn update_config(&self, config: HeaderConfig) -> Result<(), HeaderError> {
        let mut state = self.state.borrow_mut();
        match state.apply_config(config) {
            Ok(invalidated) if invalidated.is_empty() => Ok(()),
            Ok(invalidated) => {
                debug!(
                    version = state.config_version,
                    ?invalidated,
                    "header config updated"
                );
                state.render(invalidated);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "rejected header config update, keeping previous");
                Err(err)
            }
        }
    }

    /// The most recent frame.
    pub fn frame(&self) -> HeaderFrame {
        self.state.borrow().frame.clone()
    }

    pub fn progress(&self) -> CollapseProgress {
        self.state.borrow().tracker.progress()
    }

    pub fn config(&self) -> HeaderConfig {
        self.state.borrow().config.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.as_ref().is_some_and(ScrollSubscription::is_active)
    }

    /// Observe collapse progress directly, without a renderer.
    ///
    /// Listeners run inside the scroll dispatch and must not call back into
    /// this handle.
    pub fn subscribe_progress(
        &self,
        listener: impl FnMut(CollapseProgress) + 'static,
    ) -> ListenerId {
        self.state.borrow_mut().tracker.subscribe(listener)
    }

    pub fn unsubscribe_progress(&self, id: ListenerId) -> bool {
        self.state.borrow_mut().tracker.unsubscribe(id)
    }

    /// Stop receiving scroll events. No frame is produced after this returns.
    pub fn unmount(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            info!(title = %self.state.borrow().config.title_text, "header unmounted");
        }
    }
}

impl Drop for HeaderHandle {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount a header with the default [`EstimatingMeasurer`].
pub fn mount(
    config: HeaderConfig,
    source: &ScrollSource,
    renderer: impl PlatformRenderer + 'static,
) -> Result<HeaderHandle, HeaderError> {
    mount_with_measurer(config, source, renderer, Rc::new(EstimatingMeasurer))
}

/// Mount a header measuring text with the platform's `measurer`.
///
/// This sets up:
/// 1. Config validation (collapse distance, font sizes, then header width)
/// 2. Title metrics for the initial configuration
/// 3. The initial, fully expanded frame
/// 4. The scroll subscription
///
/// Any failure happens before the renderer is called or the source is
/// subscribed to.
pub fn mount_with_measurer(
    config: HeaderConfig,
    source: &ScrollSource,
    renderer: impl PlatformRenderer + 'static,
    measurer: Rc<dyn TextMeasurer>,
) -> Result<HeaderHandle, HeaderError> {
    let state = match build_state(config, Box::new(renderer), measurer) {
        Ok(state) => state,
        Err(err) => {
            warn!(error = %err, "header mount failed");
            return Err(err);
        }
    };

    info!(
        title = %state.config.title_text,
        direction = %state.config.direction,
        width = state.config.header_width,
        "header mounted"
    );

    let state = Rc::new(RefCell::new(state));
    let weak = Rc::downgrade(&state);
    let subscription = source.subscribe(move |offset_y| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut header) = shared.try_borrow_mut() else {
            warn!(offset_y, "scroll event while header is busy, dropped");
            return;
        };
        header.on_scroll(offset_y);
    });

    Ok(HeaderHandle {
        state,
        subscription: Some(subscription),
    })
}

fn build_state(
    config: HeaderConfig,
    mut renderer: Box<dyn PlatformRenderer>,
    measurer: Rc<dyn TextMeasurer>,
) -> Result<HeaderState, HeaderError> {
    config.validate()?;
    let tracker = ScrollOffsetTracker::new(config.collapse_distance)?;
    let mut resolver = TitleMetricsResolver::new(measurer);
    let metrics = resolver.resolve(&config)?;
    let policy = config.policy();

    let frame = compose_frame(
        &FrameInputs {
            config: &config,
            metrics: &metrics,
            policy: &policy,
            config_version: 0,
            progress_version: 0,
        },
        tracker.progress(),
        Invalidation::all(),
    );
    renderer.present(&frame);

    Ok(HeaderState {
        config,
        policy,
        resolver,
        metrics,
        tracker,
        renderer,
        config_version: 0,
        progress_version: 0,
        frame,
    })
}
